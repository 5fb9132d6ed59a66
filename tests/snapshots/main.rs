//! Snapshots of stable renderings of the builtin catalog.

use insta::{assert_json_snapshot, assert_snapshot};

use skillmatrix::cli::OutputFormat;
use skillmatrix::cli::commands::classify::classify_all;
use skillmatrix::cli::commands::search::render_view;
use skillmatrix::cli::commands::stats::{build_report, render_report};
use skillmatrix::config::DisplayConfig;
use skillmatrix::core::catalog::Catalog;
use skillmatrix::core::proficiency::ProficiencyScale;
use skillmatrix::error::MatrixError;
use skillmatrix::search::{CategorySelector, FilterState, MatrixView};

fn builtin() -> Catalog {
    Catalog::builtin().unwrap()
}

#[test]
fn compliance_view_plain() {
    let catalog = builtin();
    let state = FilterState::new().with_category(CategorySelector::Tag("compliance".into()));
    let view = MatrixView::build(&catalog, &state);
    let text = render_view(&view, &DisplayConfig::default(), OutputFormat::Plain);

    assert_snapshot!(text, @r"
Skills matrix: 3 of 18 skills

Governance & Compliance (3/3, avg 77%)
--------------------------------------
  ISO 27001                 85%  Advanced      6y
  NIST CSF                  80%  Advanced      5y
  GDPR                      65%  Intermediate  3y
");
}

#[test]
fn stats_report_plain() {
    let catalog = builtin();
    let report = build_report(&catalog, None).unwrap();
    let text = render_report(&report, OutputFormat::Plain);

    assert_snapshot!(text, @r"
Skills matrix statistics

Categories         5
Skills             18
Average            82%

By category
-----------
  Network Security               4 skills  avg  89%
  Offensive Security             4 skills  avg  91%
  Cloud Security                 3 skills  avg  78%
  Governance & Compliance        3 skills  avg  77%
  Development                    4 skills  avg  72%

Levels
------
  Expert           5
  Advanced        11
  Intermediate     1
  Beginner         1
  Familiar         0
");
}

#[test]
fn classification_json() {
    let results = classify_all(&[95, 5], &ProficiencyScale::default());
    assert_json_snapshot!(results, @r#"
    [
      {
        "input": 95,
        "level": "expert",
        "min_percentage": 90,
        "max_percentage": 100,
        "fallback": false
      },
      {
        "input": 5,
        "level": "familiar",
        "min_percentage": 10,
        "max_percentage": 29,
        "fallback": true
      }
    ]
    "#);
}

#[test]
fn unknown_category_error_message() {
    let err = MatrixError::UnknownCategory {
        tag: "complaince".into(),
        known: vec!["compliance".into(), "development".into()],
    };
    let structured = err.to_structured();
    assert_snapshot!(structured.to_string(), @"[E401] Unknown category filter 'complaince'");
    assert_snapshot!(
        structured.suggestion,
        @"No skill is tagged 'complaince'. Did you mean: compliance?"
    );
}
