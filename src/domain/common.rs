/// Identifies records that carry a store-assigned key.
pub trait Identifiable {
    fn id(&self) -> u64;
}

/// Supplies a one-line label for logs and external renderers.
pub trait Displayable {
    fn display_label(&self) -> String;
}
