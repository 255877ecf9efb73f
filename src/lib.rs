pub mod commands;
pub mod firestore;
pub mod generate;
pub mod seed;

pub mod cmd {
    pub use super::commands::Cli;
}
