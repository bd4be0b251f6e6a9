use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;

use tracing::{info, warn};

use crate::error::Error;
use crate::settings::Settings;

use super::commands::{
    BaseCommandOptions, InfoCommandOptions, LegendaryCommand, ListCommandOptions,
};
use super::configured_stack;
use super::decode::from_json;
use super::models::{
    GameMetadata, InstallInfo, InstalledJsonMetadata, KeyImage, LegendaryInstallPlatform,
};
use super::paths::LegendaryPaths;
use super::runner::LegendaryRunner;

/// Flattened, UI facing view of one catalog entry merged with its
/// install state. Identity is the app name; records are snapshots and
/// are replaced wholesale on refresh, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub app_name: String,
    pub title: String,
    pub developer: Option<String>,
    pub art_cover: Option<String>,
    pub art_square: Option<String>,
    pub art_logo: Option<String>,
    pub description: Option<String>,
    pub is_installed: bool,
    pub install_path: Option<String>,
}

/// Snapshot of the legendary library: the catalog documents under
/// `metadata/` merged with the install state from `installed.json`.
pub struct Library {
    catalog: BTreeMap<String, GameMetadata>,
    installed: BTreeMap<String, InstalledJsonMetadata>,
    runner: LegendaryRunner,
}

impl Library {
    /// Load the library with default settings and paths.
    ///
    /// With `force_refresh` the tool first re-syncs the catalog from
    /// the network (slow); without it only the on-disk state legendary
    /// already wrote is read. Overlapping refresh calls race over the
    /// tool's on-disk cache, so callers keep at most one refresh in
    /// flight at a time.
    pub fn init(force_refresh: bool) -> Result<Library, Error> {
        let settings = Settings::new().unwrap_or_else(|err| {
            warn!(%err, "could not load settings, using defaults");
            Settings::default()
        });
        let (paths, runner) = configured_stack(&settings);
        Library::init_with(&paths, runner, force_refresh, settings.refresh.attempts)
    }

    /// Load against explicit paths and runner. This is also the
    /// constructor tests drive with scratch directories.
    pub fn init_with(
        paths: &LegendaryPaths,
        runner: LegendaryRunner,
        force_refresh: bool,
        refresh_attempts: u32,
    ) -> Result<Library, Error> {
        if force_refresh {
            refresh(&runner, refresh_attempts)?;
        }
        let catalog = load_catalog(paths)?;
        let installed = load_installed(paths)?;
        info!(
            catalog = catalog.len(),
            installed = installed.len(),
            "library loaded"
        );
        Ok(Library {
            catalog,
            installed,
            runner,
        })
    }

    /// All known games, catalog and installed alike, sorted by app
    /// name. A game in the catalog but not installed appears with
    /// `is_installed` false and no install path; an installed game
    /// missing its catalog document still appears, described from the
    /// install record alone.
    pub fn get_games(&self) -> Vec<GameRecord> {
        let mut records: BTreeMap<&str, GameRecord> = BTreeMap::new();
        for meta in self.catalog.values() {
            records.insert(
                &meta.app_name,
                record_from_catalog(meta, self.installed.get(&meta.app_name)),
            );
        }
        for (app_name, installed) in &self.installed {
            records
                .entry(app_name)
                .or_insert_with(|| record_from_installed(installed));
        }
        records.into_values().collect()
    }

    pub fn get_game(&self, app_name: &str) -> Option<GameRecord> {
        if let Some(meta) = self.catalog.get(app_name) {
            return Some(record_from_catalog(meta, self.installed.get(app_name)));
        }
        self.installed.get(app_name).map(record_from_installed)
    }

    /// Ask the tool for manifest and install details of one app.
    /// Network-bound when the manifest is not cached yet.
    pub fn install_info(
        &self,
        app_name: &str,
        platform: Option<LegendaryInstallPlatform>,
    ) -> Result<InstallInfo, Error> {
        let mut options = InfoCommandOptions::new(app_name);
        options.platform = platform;
        let command = LegendaryCommand::Info(options);
        let output = self
            .runner
            .run_checked(&command, &BaseCommandOptions::default())?;
        from_json(&output.stdout)
    }
}

fn refresh(runner: &LegendaryRunner, attempts: u32) -> Result<(), Error> {
    let command = LegendaryCommand::List(ListCommandOptions {
        third_party: true,
        json: true,
        force_refresh: true,
        ..Default::default()
    });
    let base = BaseCommandOptions::default();
    let attempts = attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match runner.run_checked(&command, &base) {
            Ok(_) => return Ok(()),
            Err(err) if attempt < attempts => {
                warn!(attempt, %err, "library refresh failed, retrying");
            }
            Err(err) => return Err(err),
        }
    }
}

/// Install state is authoritative, so a present but undecodable
/// `installed.json` is an error. A missing file just means nothing is
/// installed yet.
fn load_installed(
    paths: &LegendaryPaths,
) -> Result<BTreeMap<String, InstalledJsonMetadata>, Error> {
    let path = paths.installed_json();
    let json = match fs::read_to_string(&path) {
        Ok(json) => json,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => return Err(Error::Io { path, source }),
    };
    from_json(&json)
}

/// Catalog documents are advisory; one that fails to decode is skipped
/// with a warning instead of taking the whole library down.
fn load_catalog(paths: &LegendaryPaths) -> Result<BTreeMap<String, GameMetadata>, Error> {
    let dir = paths.metadata_dir();
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => return Err(Error::Io { path: dir, source }),
    };

    let mut catalog = BTreeMap::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(source) => return Err(Error::Io { path: dir, source }),
        };
        if path.extension().map_or(true, |ext| ext != "json") {
            continue;
        }
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(source) => return Err(Error::Io { path, source }),
        };
        match from_json::<GameMetadata>(&json) {
            Ok(meta) => {
                catalog.insert(meta.app_name.clone(), meta);
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "skipping undecodable catalog document");
            }
        }
    }
    Ok(catalog)
}

fn record_from_catalog(
    meta: &GameMetadata,
    installed: Option<&InstalledJsonMetadata>,
) -> GameRecord {
    let key_images = meta.metadata.key_images.as_deref().unwrap_or(&[]);
    GameRecord {
        app_name: meta.app_name.clone(),
        title: meta.app_title.clone(),
        developer: meta.metadata.developer.clone(),
        art_cover: image_url(key_images, &["DieselGameBox"]),
        art_square: image_url(key_images, &["DieselGameBoxTall", "DieselStoreFrontTall"]),
        art_logo: image_url(key_images, &["DieselGameBoxLogo"]),
        description: meta.metadata.description.clone(),
        is_installed: installed.is_some(),
        install_path: installed.map(|entry| entry.install_path.clone()),
    }
}

fn record_from_installed(installed: &InstalledJsonMetadata) -> GameRecord {
    GameRecord {
        app_name: installed.app_name.clone(),
        title: installed.title.clone(),
        developer: None,
        art_cover: None,
        art_square: None,
        art_logo: None,
        description: None,
        is_installed: true,
        install_path: Some(installed.install_path.clone()),
    }
}

fn image_url(images: &[KeyImage], kinds: &[&str]) -> Option<String> {
    kinds.iter().find_map(|kind| {
        images
            .iter()
            .find(|image| image.image_type == *kind)
            .map(|image| image.url.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_installed_fixture(root: &Path) {
        std::fs::write(
            root.join("installed.json"),
            include_str!("testdata/installed.json"),
        )
        .unwrap();
    }

    fn write_metadata_fixture(root: &Path) {
        let dir = root.join("metadata");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("Fortnite.json"),
            include_str!("testdata/metadata_item.json"),
        )
        .unwrap();
    }

    /// A runner that would fail loudly if any process were spawned.
    fn unreachable_runner() -> LegendaryRunner {
        LegendaryRunner::with_executable("/nonexistent/legendary")
    }

    #[test]
    fn fast_load_reads_install_state_without_spawning() {
        let dir = tempfile::tempdir().unwrap();
        write_installed_fixture(dir.path());
        let paths = LegendaryPaths::from_root(dir.path());

        let library = Library::init_with(&paths, unreachable_runner(), false, 1).unwrap();
        let games = library.get_games();

        assert_eq!(games.len(), 1);
        let fortnite = &games[0];
        assert_eq!(fortnite.app_name, "Fortnite");
        assert!(fortnite.is_installed);
        assert_eq!(fortnite.install_path.as_deref(), Some("/games/fortnite"));
    }

    #[test]
    fn catalog_and_install_state_merge_by_app_name() {
        let dir = tempfile::tempdir().unwrap();
        write_installed_fixture(dir.path());
        write_metadata_fixture(dir.path());
        let paths = LegendaryPaths::from_root(dir.path());

        let library = Library::init_with(&paths, unreachable_runner(), false, 1).unwrap();
        let fortnite = library.get_game("Fortnite").unwrap();

        // catalog fields and install state on the same record
        assert_eq!(fortnite.developer.as_deref(), Some("Epic Games"));
        assert_eq!(
            fortnite.art_cover.as_deref(),
            Some("https://cdn1.epicgames.com/offer/fn/cover.jpg")
        );
        assert_eq!(
            fortnite.art_square.as_deref(),
            Some("https://cdn1.epicgames.com/offer/fn/tall.jpg")
        );
        assert_eq!(
            fortnite.art_logo.as_deref(),
            Some("https://cdn1.epicgames.com/offer/fn/logo.png")
        );
        assert!(fortnite.is_installed);
        assert_eq!(fortnite.install_path.as_deref(), Some("/games/fortnite"));
    }

    #[test]
    fn game_list_is_the_union_of_catalog_and_install_state() {
        let dir = tempfile::tempdir().unwrap();
        write_installed_fixture(dir.path());
        let metadata_dir = dir.path().join("metadata");
        std::fs::create_dir_all(&metadata_dir).unwrap();
        // catalog-only app, no matching install record
        std::fs::write(
            metadata_dir.join("RocketLeague.json"),
            r#"{
                "app_name": "RocketLeague",
                "app_title": "Rocket League",
                "asset_infos": {},
                "base_urls": [],
                "metadata": {"developer": "Psyonix"}
            }"#,
        )
        .unwrap();
        let paths = LegendaryPaths::from_root(dir.path());

        let library = Library::init_with(&paths, unreachable_runner(), false, 1).unwrap();
        let games = library.get_games();

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].app_name, "Fortnite");
        assert!(games[0].is_installed);
        assert_eq!(games[1].app_name, "RocketLeague");
        assert_eq!(games[1].developer.as_deref(), Some("Psyonix"));
        assert!(!games[1].is_installed);
    }

    #[test]
    fn catalog_only_games_are_listed_as_not_installed() {
        let dir = tempfile::tempdir().unwrap();
        write_metadata_fixture(dir.path());
        let paths = LegendaryPaths::from_root(dir.path());

        let library = Library::init_with(&paths, unreachable_runner(), false, 1).unwrap();
        let games = library.get_games();

        assert_eq!(games.len(), 1);
        assert!(!games[0].is_installed);
        assert!(games[0].install_path.is_none());
    }

    #[test]
    fn empty_directory_is_an_empty_library() {
        let dir = tempfile::tempdir().unwrap();
        let paths = LegendaryPaths::from_root(dir.path());

        let library = Library::init_with(&paths, unreachable_runner(), false, 1).unwrap();
        assert!(library.get_games().is_empty());
        assert!(library.get_game("Fortnite").is_none());
    }

    #[test]
    fn corrupt_installed_json_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("installed.json"), "{ broken").unwrap();
        let paths = LegendaryPaths::from_root(dir.path());

        let result = Library::init_with(&paths, unreachable_runner(), false, 1);
        assert!(matches!(result, Err(Error::Decode { .. })));
    }

    #[test]
    fn corrupt_catalog_document_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_metadata_fixture(dir.path());
        std::fs::write(dir.path().join("metadata").join("Broken.json"), "{ nope").unwrap();
        let paths = LegendaryPaths::from_root(dir.path());

        let library = Library::init_with(&paths, unreachable_runner(), false, 1).unwrap();
        assert_eq!(library.get_games().len(), 1);
    }

    #[cfg(target_family = "unix")]
    mod with_fake_tool {
        use super::*;
        use crate::legendary::testutil::fake_tool;

        #[test]
        fn force_refresh_invokes_the_tool_before_loading() {
            let dir = tempfile::tempdir().unwrap();
            write_installed_fixture(dir.path());
            let marker = dir.path().join("refreshed");
            let tool = fake_tool(
                dir.path(),
                &format!("touch '{}'", marker.display()),
            );
            let paths = LegendaryPaths::from_root(dir.path());
            let runner = LegendaryRunner::with_executable(tool.to_string_lossy());

            let library = Library::init_with(&paths, runner, true, 1).unwrap();
            assert!(marker.exists());
            assert_eq!(library.get_games().len(), 1);
        }

        #[test]
        fn install_info_decodes_the_tool_output() {
            let dir = tempfile::tempdir().unwrap();
            let response = dir.path().join("info.json");
            std::fs::write(&response, include_str!("testdata/install_info.json")).unwrap();
            let tool = fake_tool(dir.path(), &format!("cat '{}'", response.display()));
            let paths = LegendaryPaths::from_root(dir.path());
            let runner = LegendaryRunner::with_executable(tool.to_string_lossy());

            let library = Library::init_with(&paths, runner, false, 1).unwrap();
            let info = library.install_info("Fortnite", None).unwrap();

            assert_eq!(info.game.app_name, "Fortnite");
            assert_eq!(info.manifest.num_files, 18231);
        }

        #[test]
        fn refresh_retries_up_to_the_configured_attempts() {
            let dir = tempfile::tempdir().unwrap();
            let calls = dir.path().join("calls");
            let tool = fake_tool(
                dir.path(),
                &format!("echo x >> '{}'; echo 'offline' >&2; exit 2", calls.display()),
            );
            let paths = LegendaryPaths::from_root(dir.path());
            let runner = LegendaryRunner::with_executable(tool.to_string_lossy());

            let result = Library::init_with(&paths, runner, true, 3);
            assert!(matches!(result, Err(Error::Process { code: 2, .. })));
            let recorded = std::fs::read_to_string(&calls).unwrap();
            assert_eq!(recorded.lines().count(), 3);
        }
    }
}
