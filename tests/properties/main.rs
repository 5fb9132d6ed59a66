mod classify_props;
mod filter_props;
