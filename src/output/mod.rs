pub mod human;

/// Trait for command outputs that can be summarized for a terminal.
pub trait CommandOutput {
    fn human_display(&self) -> String;
}
