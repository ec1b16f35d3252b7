pub mod tui;

pub use tui::ConsoleInputPort;
