//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, so dispatch
//! in `main` is fully static.

mod info;
mod init;
mod search;
mod telegram;
mod version;
mod watch;

pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use search::{SearchInput, SearchStrategy};
pub use telegram::{TelegramInput, TelegramStrategy};
pub use version::VersionStrategy;
pub use watch::{WatchInput, WatchStrategy};

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust,ignore
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         // Command logic here
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
