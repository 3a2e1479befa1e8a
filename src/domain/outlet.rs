// src/domain/outlet.rs

use serde::{Deserialize, Serialize};
use url::Url;

/// Sales point of a merchant. Each outlet gets its own application link,
/// which is what the printed QR code points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outlet {
    pub index: u32,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutletLink {
    pub outlet: Outlet,
    pub url: Url,
}

/// Public link for `(merchant_slug, outlet_index)`:
/// `{public_base}/p/{merchant_slug}/apply/{outlet_index}`.
pub fn application_link(public_base: &Url, merchant_slug: &str, outlet_index: u32) -> Url {
    let mut url = public_base.clone();
    url.set_query(None);
    url.set_fragment(None);
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .push("p")
            .push(merchant_slug)
            .push("apply")
            .push(&outlet_index.to_string());
    }
    url
}

pub fn outlet_links(public_base: &Url, merchant_slug: &str, outlets: &[Outlet]) -> Vec<OutletLink> {
    outlets
        .iter()
        .map(|outlet| OutletLink {
            outlet: outlet.clone(),
            url: application_link(public_base, merchant_slug, outlet.index),
        })
        .collect()
}
