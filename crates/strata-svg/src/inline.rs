//! Resource inlining.
//!
//! An SVG that points at external images breaks as soon as it leaves the
//! machine it was made on. Inlining replaces every image reference in a
//! finished stacking tree with a `data:` URL holding the bytes.
//!
//! Fetches fan out over rayon's global pool. Each reference succeeds or
//! fails on its own: a failed fetch warns once and leaves that reference as
//! it was, and the other references are unaffected.

use std::collections::{BTreeSet, HashMap};

use rayon::prelude::*;
use strata_common::net::{DataUrl, NetError, fetch_bytes, sniff_media_type};
use strata_common::url::resolve_url;
use strata_common::warning::warn_once;
use strata_css::StackingContext;

use crate::primitive::Primitive;

/// What happened to the references of one tree.
#[derive(Debug, Default)]
pub struct InlineReport {
    /// References replaced with `data:` URLs.
    pub inlined: Vec<String>,
    /// References left untouched because fetching them failed.
    pub failed: Vec<(String, NetError)>,
}

/// Replace every external image reference in `root` with a `data:` URL.
///
/// Relative references are resolved against `base_url`. References that
/// are already `data:` URLs are left alone.
#[must_use]
pub fn inline_resources(
    root: StackingContext<Primitive>,
    base_url: Option<&str>,
) -> (StackingContext<Primitive>, InlineReport) {
    // STEP 1: Collect distinct references, in a stable order.
    let references: BTreeSet<String> = root
        .primitives()
        .into_iter()
        .filter_map(Primitive::href)
        .filter(|href| !is_data_url(href))
        .map(str::to_string)
        .collect();
    if references.is_empty() {
        return (root, InlineReport::default());
    }

    // STEP 2: Fetch and encode in parallel.
    let results: Vec<(String, Result<String, NetError>)> = references
        .into_par_iter()
        .map(|reference| {
            let resolved = resolve_url(&reference, base_url);
            let encoded = fetch_bytes(&resolved).map(|bytes| {
                DataUrl::encode(sniff_media_type(&bytes, &resolved), &bytes)
            });
            (reference, encoded)
        })
        .collect();

    // STEP 3: Partition into replacements and failures.
    let mut report = InlineReport::default();
    let mut replacements = HashMap::new();
    for (reference, result) in results {
        match result {
            Ok(data_url) => {
                report.inlined.push(reference.clone());
                let _ = replacements.insert(reference, data_url);
            }
            Err(err) => {
                warn_once("Inline", &format!("failed to inline '{reference}': {err}"));
                report.failed.push((reference, err));
            }
        }
    }

    // STEP 4: Splice the data URLs back into the tree.
    let root = root.map(&mut |primitive| match primitive {
        Primitive::Image {
            x,
            y,
            width,
            height,
            href,
        } => {
            let href = replacements.get(&href).cloned().unwrap_or(href);
            Primitive::Image {
                x,
                y,
                width,
                height,
                href,
            }
        }
        other => other,
    });
    (root, report)
}

fn is_data_url(reference: &str) -> bool {
    reference
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}
