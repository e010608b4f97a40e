// ABOUTME: UI components for the TUI interface including the viewer panel, layout, and help

pub mod help;
pub mod layout;
pub mod viewer;

pub use help::HelpComponent;
pub use layout::LayoutComponent;
pub use viewer::ViewerComponent;
