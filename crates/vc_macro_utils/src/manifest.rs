use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

const FACADE_NAME: &str = "vc_graph";
const CRATE_PREFIX: &str = "vc_";
const DEPENDENCY_TABLES: [&str; 2] = ["dependencies", "dev-dependencies"];

/// Resolves how a generated path must name a workspace crate, as seen
/// from the Cargo.toml of the crate invoking the macro.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_persist"));
/// ```
///
/// Reading the manifest is not free, so resolve once per macro invocation
/// and pass the path around.
///
/// # Resolution rules
///
/// 1. The crate is listed in `dependencies`: `::crate_name`.
/// 2. The name starts with `vc_` and the caller depends on the facade
///    crate `vc_graph`: `::vc_graph::short_name`
///    (`vc_persist` becomes `::vc_graph::persist`).
/// 3. Steps 1 and 2 again for `dev-dependencies`.
/// 4. Otherwise `::crate_name`.
///
/// A crate that expands its own derives (tests, doctests) needs
/// `extern crate self as crate_name;` at its root so that rule 4 resolves.
#[derive(Debug)]
pub struct Manifest {
    document: Document<Box<str>>,
    modified: Option<SystemTime>,
}

impl Manifest {
    /// Parses a manifest from its text.
    ///
    /// # Panics
    ///
    /// Panics on malformed TOML, which aborts the macro expansion.
    pub fn parse(text: &str) -> Self {
        let document = Document::parse(Box::<str>::from(text))
            .unwrap_or_else(|err| panic!("failed to parse cargo manifest: {err}"));
        Self {
            document,
            modified: None,
        }
    }

    fn caller_manifest_path() -> PathBuf {
        let Some(dir) = std::env::var_os("CARGO_MANIFEST_DIR") else {
            panic!("CARGO_MANIFEST_DIR is not set; proc-macros must run under cargo");
        };
        PathBuf::from(dir).join("Cargo.toml")
    }

    fn modified_time(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
    }

    fn load(path: &Path) -> Self {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|err| panic!("unable to read {}: {err}", path.display()));
        let mut manifest = Self::parse(&text);
        manifest.modified = Self::modified_time(path);
        manifest
    }

    fn lookup(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(absolute(name));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        if !deps.contains_key(FACADE_NAME) {
            return None;
        }
        let mut path = absolute(FACADE_NAME);
        path.segments.push(syn::PathSegment::from(syn::Ident::new(
            module,
            proc_macro2_span(),
        )));
        Some(path)
    }

    /// Returns the path under which `name` is reachable from the caller.
    /// See the type-level documentation for the rules.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        DEPENDENCY_TABLES
            .iter()
            .filter_map(|table| match self.document.get(table) {
                Some(Item::Table(deps)) => Some(deps),
                _ => None,
            })
            .find_map(|deps| Self::lookup(deps, name))
            .unwrap_or_else(|| absolute(name))
    }

    /// Runs `func` against the caller's Cargo.toml.
    ///
    /// Manifests are cached per path and re-read when the file changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static CACHE: Mutex<BTreeMap<PathBuf, Manifest>> = Mutex::new(BTreeMap::new());

        let path = Self::caller_manifest_path();
        let modified = Self::modified_time(&path);

        let mut cache = CACHE.lock().unwrap_or_else(PoisonError::into_inner);
        let stale = cache
            .get(&path)
            .is_none_or(|cached| modified.is_none() || cached.modified != modified);
        if stale {
            cache.insert(path.clone(), Self::load(&path));
        }

        match cache.get(&path) {
            Some(manifest) => func(manifest),
            None => func(&Self::load(&path)),
        }
    }
}

fn proc_macro2_span() -> proc_macro2::Span {
    proc_macro2::Span::call_site()
}

fn absolute(name: &str) -> syn::Path {
    let mut path = syn::Path::from(syn::Ident::new(name, proc_macro2_span()));
    path.leading_colon = Some(Default::default());
    path
}

// -----------------------------------------------------------------------------
// Tests
