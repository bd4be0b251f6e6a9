use std::fs;

use tracing::{info, warn};

use crate::error::Error;
use crate::settings::Settings;

use super::commands::{AuthCommandOptions, BaseCommandOptions, LegendaryCommand};
use super::configured_stack;
use super::decode::from_json;
use super::models::UserInfo;
use super::paths::LegendaryPaths;
use super::runner::{process_failure, LegendaryRunner};

/// Display projection of the stored session. The full [`UserInfo`]
/// carries tokens the UI has no business holding on to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub display_name: String,
    pub account_id: String,
}

impl From<UserInfo> for UserAccount {
    fn from(info: UserInfo) -> Self {
        UserAccount {
            display_name: info.display_name,
            account_id: info.account_id,
        }
    }
}

// legendary prints this on stderr when the exchange fails, sometimes
// with exit code 0.
const LOGIN_ERROR_MARKER: &str = "ERROR: Logging in";

/// Session operations against the tool's stored credentials. Login and
/// logout spawn the tool and are network-bound; the presence check and
/// profile read only touch `user.json`.
pub struct User {
    paths: LegendaryPaths,
    runner: LegendaryRunner,
}

impl User {
    pub fn new() -> User {
        let settings = Settings::new().unwrap_or_else(|err| {
            warn!(%err, "could not load settings, using defaults");
            Settings::default()
        });
        let (paths, runner) = configured_stack(&settings);
        User { paths, runner }
    }

    pub fn with(paths: LegendaryPaths, runner: LegendaryRunner) -> User {
        User { paths, runner }
    }

    /// Cheap local check: a session exists and still decodes. Never
    /// spawns the tool.
    pub fn is_logged_in(&self) -> bool {
        match fs::read_to_string(self.paths.user_json()) {
            Ok(json) => from_json::<UserInfo>(&json).is_ok(),
            Err(_) => false,
        }
    }

    /// Exchange an authorization code for a stored session. Success
    /// carries no payload; follow up with [`get_user_info`](Self::get_user_info)
    /// to populate display data.
    pub fn try_login(&self, auth_code: &str) -> Result<(), Error> {
        let command = LegendaryCommand::Auth(AuthCommandOptions::with_code(auth_code));
        let output = self.runner.run(&command, &BaseCommandOptions::default())?;

        if output.stderr.contains(LOGIN_ERROR_MARKER) {
            return Err(Error::Auth {
                reason: output.stderr.trim().to_string(),
            });
        }
        if !output.success() {
            return Err(process_failure(&command, &output));
        }
        info!("login succeeded");
        Ok(())
    }

    /// Drop the stored session. Afterwards
    /// [`is_logged_in`](Self::is_logged_in) reports false.
    pub fn try_logout(&self) -> Result<(), Error> {
        let command = LegendaryCommand::Auth(AuthCommandOptions::delete_session());
        self.runner
            .run_checked(&command, &BaseCommandOptions::default())?;
        info!("logout succeeded");
        Ok(())
    }

    /// Read and project the stored session.
    pub fn get_user_info(&self) -> Result<UserAccount, Error> {
        let path = self.paths.user_json();
        let json = fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let info: UserInfo = from_json(&json)?;
        Ok(UserAccount::from(info))
    }
}

impl Default for User {
    fn default() -> Self {
        User::new()
    }
}
