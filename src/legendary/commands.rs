//! Structured descriptions of legendary invocations and their pure
//! serialization to argument vectors. Token order is a contract:
//! base options, then the verb, then verb flags, then positionals.
//! Nothing here touches a process, so every sequence can be asserted
//! byte for byte in tests.

use super::models::LegendaryInstallPlatform;

/// Options accepted by every legendary verb, emitted ahead of the verb
/// so tool wide behavior does not depend on the command.
#[derive(Debug, Default, Clone)]
pub struct BaseCommandOptions {
    pub verbose: bool,
    pub debug: bool,
    pub yes: bool,
    pub version: bool,
    pub pretty_json: bool,
    pub api_timeout: Option<u32>,
}

impl BaseCommandOptions {
    pub fn to_arguments(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.verbose {
            args.push("-v".to_string());
        }
        if self.debug {
            args.push("--debug".to_string());
        }
        if self.yes {
            args.push("-y".to_string());
        }
        if self.version {
            args.push("-V".to_string());
        }
        if self.pretty_json {
            args.push("-J".to_string());
        }
        if let Some(timeout) = self.api_timeout {
            args.push("-A".to_string());
            args.push(timeout.to_string());
        }
        args
    }
}

#[derive(Debug, Default, Clone)]
pub struct ListCommandOptions {
    pub platform: Option<LegendaryInstallPlatform>,
    pub include_ue: bool,
    pub third_party: bool,
    pub include_non_installable: bool,
    pub csv: bool,
    pub tsv: bool,
    pub json: bool,
    pub force_refresh: bool,
}

impl ListCommandOptions {
    fn to_arguments(&self) -> Vec<String> {
        let mut args = vec!["list".to_string()];
        if let Some(platform) = self.platform {
            args.push("--platform".to_string());
            args.push(platform.as_str().to_string());
        }
        if self.include_ue {
            args.push("--include-ue".to_string());
        }
        if self.third_party {
            args.push("-T".to_string());
            args.push("--third-party".to_string());
        }
        if self.include_non_installable {
            args.push("--include-non-installable".to_string());
        }
        if self.csv {
            args.push("--csv".to_string());
        }
        if self.tsv {
            args.push("--tsv".to_string());
        }
        if self.json {
            args.push("--json".to_string());
        }
        if self.force_refresh {
            args.push("--force-refresh".to_string());
        }
        args
    }
}

#[derive(Debug, Default, Clone)]
pub struct AuthCommandOptions {
    pub import: bool,
    pub code: Option<String>,
    pub token: Option<String>,
    pub sid: Option<String>,
    pub delete: bool,
    pub disable_webview: bool,
}

impl AuthCommandOptions {
    /// Exchange an authorization code for a stored session.
    pub fn with_code<S: Into<String>>(code: S) -> Self {
        AuthCommandOptions {
            code: Some(code.into()),
            ..Default::default()
        }
    }

    /// Drop the stored session.
    pub fn delete_session() -> Self {
        AuthCommandOptions {
            delete: true,
            ..Default::default()
        }
    }

    fn to_arguments(&self) -> Vec<String> {
        let mut args = vec!["auth".to_string()];
        if self.import {
            args.push("--import".to_string());
        }
        if let Some(code) = &self.code {
            args.push("--code".to_string());
            args.push(code.clone());
        }
        if let Some(token) = &self.token {
            args.push("--token".to_string());
            args.push(token.clone());
        }
        if let Some(sid) = &self.sid {
            args.push("--sid".to_string());
            args.push(sid.clone());
        }
        if self.delete {
            args.push("--delete".to_string());
        }
        if self.disable_webview {
            args.push("--disable-webview".to_string());
        }
        args
    }
}

/// Register an existing on-disk installation with legendary.
#[derive(Debug, Clone)]
pub struct ImportCommandOptions {
    pub app_name: String,
    pub installation_directory: String,
    pub disable_check: bool,
    pub with_dlcs: bool,
    pub platform: Option<LegendaryInstallPlatform>,
}

impl ImportCommandOptions {
    pub fn new<A: Into<String>, D: Into<String>>(app_name: A, installation_directory: D) -> Self {
        ImportCommandOptions {
            app_name: app_name.into(),
            installation_directory: installation_directory.into(),
            disable_check: false,
            with_dlcs: false,
            platform: None,
        }
    }

    fn to_arguments(&self) -> Vec<String> {
        let mut args = vec!["import".to_string()];
        if self.disable_check {
            args.push("--disable-check".to_string());
        }
        if self.with_dlcs {
            args.push("--with-dlcs".to_string());
        }
        if let Some(platform) = self.platform {
            args.push("--platform".to_string());
            args.push(platform.as_str().to_string());
        }
        args.push(self.app_name.clone());
        args.push(self.installation_directory.clone());
        args
    }
}

#[derive(Debug, Clone)]
pub struct InfoCommandOptions {
    pub app_name: String,
    pub platform: Option<LegendaryInstallPlatform>,
    pub json: bool,
}

impl InfoCommandOptions {
    pub fn new<A: Into<String>>(app_name: A) -> Self {
        InfoCommandOptions {
            app_name: app_name.into(),
            platform: None,
            json: true,
        }
    }

    fn to_arguments(&self) -> Vec<String> {
        let mut args = vec!["info".to_string()];
        if let Some(platform) = self.platform {
            args.push("--platform".to_string());
            args.push(platform.as_str().to_string());
        }
        if self.json {
            args.push("--json".to_string());
        }
        args.push(self.app_name.clone());
        args
    }
}

/// One fully described invocation. Immutable once built; serializing
/// it is deterministic, so equal commands always produce equal tokens.
#[derive(Debug, Clone)]
pub enum LegendaryCommand {
    List(ListCommandOptions),
    Auth(AuthCommandOptions),
    Import(ImportCommandOptions),
    Info(InfoCommandOptions),
}

impl LegendaryCommand {
    pub fn verb(&self) -> &'static str {
        match self {
            LegendaryCommand::List(_) => "list",
            LegendaryCommand::Auth(_) => "auth",
            LegendaryCommand::Import(_) => "import",
            LegendaryCommand::Info(_) => "info",
        }
    }

    pub fn to_arguments(&self, base: &BaseCommandOptions) -> Vec<String> {
        let mut args = base.to_arguments();
        match self {
            LegendaryCommand::List(options) => args.extend(options.to_arguments()),
            LegendaryCommand::Auth(options) => args.extend(options.to_arguments()),
            LegendaryCommand::Import(options) => args.extend(options.to_arguments()),
            LegendaryCommand::Info(options) => args.extend(options.to_arguments()),
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_options_serialize_in_fixed_order() {
        let base = BaseCommandOptions {
            verbose: true,
            debug: true,
            yes: true,
            version: false,
            pretty_json: true,
            api_timeout: Some(30),
        };
        assert_eq!(
            base.to_arguments(),
            vec!["-v", "--debug", "-y", "-J", "-A", "30"]
        );
    }

    #[test]
    fn list_command_token_sequence() {
        let command = LegendaryCommand::List(ListCommandOptions {
            platform: Some(LegendaryInstallPlatform::Windows),
            third_party: true,
            json: true,
            force_refresh: true,
            ..Default::default()
        });
        assert_eq!(
            command.to_arguments(&BaseCommandOptions::default()),
            vec![
                "list",
                "--platform",
                "Windows",
                "-T",
                "--third-party",
                "--json",
                "--force-refresh"
            ]
        );
    }

    #[test]
    fn absent_platform_emits_no_flag() {
        let command = LegendaryCommand::List(ListCommandOptions {
            json: true,
            ..Default::default()
        });
        let args = command.to_arguments(&BaseCommandOptions::default());
        assert_eq!(args, vec!["list", "--json"]);
        assert!(args.iter().all(|token| !token.is_empty()));
    }

    #[test]
    fn base_options_precede_the_verb() {
        let command = LegendaryCommand::Auth(AuthCommandOptions::with_code("abc123"));
        let base = BaseCommandOptions {
            yes: true,
            ..Default::default()
        };
        assert_eq!(
            command.to_arguments(&base),
            vec!["-y", "auth", "--code", "abc123"]
        );
    }

    #[test]
    fn auth_delete_token_sequence() {
        let command = LegendaryCommand::Auth(AuthCommandOptions::delete_session());
        assert_eq!(
            command.to_arguments(&BaseCommandOptions::default()),
            vec!["auth", "--delete"]
        );
    }

    #[test]
    fn import_flags_precede_positionals() {
        let mut options = ImportCommandOptions::new("Fortnite", "/games/fortnite");
        options.with_dlcs = true;
        options.platform = Some(LegendaryInstallPlatform::Mac);
        let command = LegendaryCommand::Import(options);
        assert_eq!(
            command.to_arguments(&BaseCommandOptions::default()),
            vec![
                "import",
                "--with-dlcs",
                "--platform",
                "Mac",
                "Fortnite",
                "/games/fortnite"
            ]
        );
    }

    #[test]
    fn info_command_token_sequence() {
        let command = LegendaryCommand::Info(InfoCommandOptions::new("Fortnite"));
        assert_eq!(
            command.to_arguments(&BaseCommandOptions::default()),
            vec!["info", "--json", "Fortnite"]
        );
    }

    #[test]
    fn serialization_is_deterministic() {
        let command = LegendaryCommand::List(ListCommandOptions {
            platform: Some(LegendaryInstallPlatform::Ios),
            include_ue: true,
            csv: true,
            ..Default::default()
        });
        let base = BaseCommandOptions {
            api_timeout: Some(10),
            ..Default::default()
        };
        assert_eq!(command.to_arguments(&base), command.to_arguments(&base));
    }
}
