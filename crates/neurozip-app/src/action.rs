//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use neurozip_client::Request;

use crate::RequestToken;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Send a request to the service.
    Dispatch {
        /// Token the completion must carry back.
        token: RequestToken,
        /// Operation and its argument.
        request: Request,
    },

    /// Ask the service whether it is reachable.
    ProbeService,
}
