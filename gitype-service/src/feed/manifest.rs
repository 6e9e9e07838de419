use gitype_domain::{Icon, ManifestConfig, ManifestDir, ManifestDisplay, ManifestOrientation};
use serde::Serialize;

#[derive(Serialize)]
struct Manifest<'a> {
    lang: &'a str,
    name: &'a str,
    short_name: &'a str,
    start_url: &'a str,
    display: ManifestDisplay,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    dir: ManifestDir,
    #[serde(skip_serializing_if = "Option::is_none")]
    orientation: Option<ManifestOrientation>,
    #[serde(skip_serializing_if = "str::is_empty")]
    scope: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    theme_color: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    background_color: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    icons: Vec<ManifestIcon<'a>>,
}

#[derive(Serialize)]
struct ManifestIcon<'a> {
    src: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    sizes: &'a str,
    #[serde(rename = "type", skip_serializing_if = "str::is_empty")]
    mime: &'a str,
}

impl<'a> From<&'a Icon> for ManifestIcon<'a> {
    fn from(icon: &'a Icon) -> Self {
        Self {
            src: &icon.url,
            sizes: &icon.sizes,
            mime: &icon.mime,
        }
    }
}

/// 生成 PWA 的 manifest.json
pub fn build(manifest: &ManifestConfig) -> Result<Vec<u8>, serde_json::Error> {
    let value = Manifest {
        lang: &manifest.lang,
        name: &manifest.name,
        short_name: &manifest.short_name,
        start_url: &manifest.start_url,
        display: manifest.display,
        description: &manifest.description,
        dir: manifest.dir,
        orientation: manifest.orientation,
        scope: &manifest.scope,
        theme_color: &manifest.theme_color,
        background_color: &manifest.background_color,
        icons: manifest.icons.iter().map(ManifestIcon::from).collect(),
    };
    serde_json::to_vec_pretty(&value)
}
