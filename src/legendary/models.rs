//! Typed views of the JSON documents legendary produces, both on
//! stdout and inside its config directory. Only the fields the UI
//! actually consumes are modelled; everything legendary manages for
//! itself stays an opaque [`serde_json::Value`] so schema drift on
//! those regions never breaks decoding.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Platforms legendary can install for, with their exact wire strings.
/// A string outside this set is a decode error, not a fallback.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendaryInstallPlatform {
    Windows,
    Win32,
    Mac,
    Android,
    #[serde(rename = "iOS")]
    Ios,
}

impl LegendaryInstallPlatform {
    /// The encoding used both in JSON payloads and for `--platform`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LegendaryInstallPlatform::Windows => "Windows",
            LegendaryInstallPlatform::Win32 => "Win32",
            LegendaryInstallPlatform::Mac => "Mac",
            LegendaryInstallPlatform::Android => "Android",
            LegendaryInstallPlatform::Ios => "iOS",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Prerequisite {
    pub args: String,
    pub ids: Vec<String>,
    pub name: String,
    pub path: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CustomAttributeValue {
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct KeyImage {
    pub height: u32,
    pub md5: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub image_type: String,
    pub uploaded_date: String,
    pub url: String,
    pub width: u32,
    pub alt: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Category {
    pub path: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseInfo {
    pub app_id: String,
    pub id: String,
    pub platform: Option<Vec<String>>,
    pub date_added: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MainGameItem {
    pub id: String,
    pub namespace: String,
    pub unsearchable: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AssetInfo {
    pub app_name: String,
    pub asset_id: String,
    pub build_version: String,
    pub catalog_item_id: String,
    pub label_name: String,
    /// Sidecar blob legendary tracks per asset; not consumed here.
    pub metadata: Value,
    pub namespace: String,
}

/// Catalog entry as Epic serves it. Recursive through `dlc_item_list`;
/// DLC entries carry the same shape as their parent, to any depth.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GameMetadataInner {
    pub age_gatings: Option<Value>,
    pub application_id: Option<String>,
    pub categories: Option<Vec<Category>>,
    pub creation_date: Option<String>,
    pub custom_attributes: Option<HashMap<String, CustomAttributeValue>>,
    pub description: Option<String>,
    pub developer: Option<String>,
    pub developer_id: Option<String>,
    pub dlc_item_list: Option<Vec<GameMetadataInner>>,
    pub end_of_support: Option<bool>,
    pub entitlement_name: Option<String>,
    pub entitlement_type: Option<String>,
    pub eula_ids: Option<Vec<String>>,
    pub id: Option<String>,
    pub item_type: Option<String>,
    pub key_images: Option<Vec<KeyImage>>,
    pub last_modified_date: Option<String>,
    pub main_game_item: Option<MainGameItem>,
    pub main_game_item_list: Option<Vec<MainGameItem>>,
    pub short_description: Option<String>,
    pub namespace: Option<String>,
    pub release_info: Option<Vec<ReleaseInfo>>,
    pub requires_secure_account: Option<bool>,
    pub self_refundable: Option<bool>,
    pub status: Option<String>,
    pub technical_details: Option<String>,
    pub title: Option<String>,
    pub unsearchable: Option<bool>,
    pub use_count: Option<i64>,
}

/// One `metadata/<app_name>.json` document.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameMetadata {
    pub app_name: String,
    pub app_title: String,
    pub asset_infos: HashMap<String, AssetInfo>,
    pub base_urls: Vec<String>,
    pub metadata: GameMetadataInner,
}

/// One entry of `installed.json`, which maps app names to this record.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InstalledJsonMetadata {
    pub app_name: String,
    pub base_urls: Vec<String>,
    pub can_run_offline: bool,
    pub egl_guid: String,
    pub executable: String,
    pub install_path: String,
    pub install_size: i64,
    pub install_tags: Vec<String>,
    pub is_dlc: bool,
    pub launch_parameters: String,
    pub manifest_path: Option<String>,
    pub needs_verification: bool,
    pub platform: LegendaryInstallPlatform,
    pub prereq_info: Option<Vec<Prerequisite>>,
    pub requires_ot: bool,
    pub save_path: Option<String>,
    pub title: String,
    pub version: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DlcInfo {
    pub app_name: String,
    pub title: String,
    pub is_installed: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LaunchOption {
    pub name: String,
    pub parameters: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TagInfo {
    pub tag: String,
    pub count: i64,
    pub size: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameManifest {
    pub app_name: String,
    pub build_id: String,
    pub build_version: String,
    pub disk_size: i64,
    pub download_size: i64,
    pub feature_level: i64,
    pub install_tags: Vec<String>,
    pub launch_command: String,
    pub launch_exe: String,
    pub num_chunks: i64,
    pub num_files: i64,
    pub prerequisites: Option<Prerequisite>,
    pub size: i64,
    pub tag_disk_size: Vec<TagInfo>,
    pub tag_download_size: Vec<TagInfo>,
    #[serde(rename = "type")]
    pub manifest_type: String,
    pub version: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameInstallInfo {
    pub app_name: String,
    pub cloud_save_folder: Option<String>,
    pub cloud_save_folder_mac: Option<String>,
    pub cloud_saves_supported: bool,
    pub external_activation: String,
    pub is_dlc: bool,
    pub launch_options: Vec<LaunchOption>,
    pub owned_dlc: Vec<DlcInfo>,
    pub platform_versions: HashMap<String, String>,
    pub title: String,
    pub version: String,
}

/// Output of `legendary info <app> --json`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InstallInfo {
    pub game: GameInstallInfo,
    pub manifest: GameManifest,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SelectiveDownload {
    pub tags: Vec<String>,
    pub name: String,
    pub description: String,
    pub required: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameOverride {
    pub executable_override: HashMap<String, HashMap<String, String>>,
    pub reorder_optimization: HashMap<String, Vec<String>>,
    pub sdl_config: HashMap<String, i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LegendaryConfig {
    pub webview_killswitch: bool,
}

/// Service-side configuration legendary caches. The EGL config and
/// runtime descriptors vary per release and are kept opaque.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LegendaryApiResponse {
    pub egl_config: Value,
    pub game_overrides: GameOverride,
    pub legendary_config: LegendaryConfig,
    pub runtimes: Vec<Value>,
}

/// Stored session, `user.json`. Note `displayName` is the one camel
/// cased key in an otherwise snake cased document.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserInfo {
    pub access_token: String,
    pub account_id: String,
    pub acr: String,
    pub app: String,
    pub auth_time: String,
    pub client_id: String,
    pub client_service: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub expires_at: String,
    pub expires_in: i64,
    pub in_app_id: String,
    pub internal_client: bool,
    #[serde(rename = "refresh_expires")]
    pub refresh_expires_in: i64,
    pub refresh_expires_at: String,
    pub refresh_token: String,
    pub scope: Vec<String>,
    pub token_type: String,
}
