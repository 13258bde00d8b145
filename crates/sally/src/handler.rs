use crate::config::{Config, Package};
use crate::render::{IndexEntry, IndexPage, PackagePage};
use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Router,
};
use percent_encoding::percent_decode_str;
use sally_path_tree::PathTree;
use std::collections::HashMap;
use std::sync::Arc;

/// Serves vanity import pages for the configured packages.
///
/// The package tree is built once here and only read afterwards, so a single
/// instance is shared by every request handler through an `Arc`.
#[derive(Debug)]
pub struct Sally {
    config: Config,
    packages: PathTree<Package>,
}

impl Sally {
    pub fn new(config: Config) -> Self {
        let packages = config
            .packages
            .iter()
            .map(|(name, package)| (name, package.clone()))
            .collect();
        Self { config, packages }
    }

    /// Router answering every path with [`Sally::respond`].
    pub fn router(self) -> Router {
        Router::new().fallback(serve).with_state(Arc::new(self))
    }

    /// Builds the response for a request to `request_path`: the decoded URL
    /// path, including its leading `/`.
    pub fn respond(&self, method: &Method, request_path: &str) -> Response {
        let path = request_path.strip_prefix('/').unwrap_or(request_path);

        if let Some((name, package)) = self.packages.lookup(path) {
            log::debug!("{method} {request_path}: package {name}");
            let page = self.package_page(name, package, path);
            return Html(page.render()).into_response();
        }

        let listing = self.packages.list_by_path(path);
        if listing.is_empty() && *method != Method::GET {
            log::debug!("{method} {request_path}: not found");
            return (StatusCode::NOT_FOUND, "404 page not found\n").into_response();
        }

        log::debug!(
            "{method} {request_path}: index of {} package(s)",
            listing.len()
        );
        Html(self.index_page(&listing).render()).into_response()
    }

    fn package_page(&self, name: &str, package: &Package, path: &str) -> PackagePage {
        // Subpackage path relative to the matched package.
        //   "foo/bar" => "/bar"
        //   "foo" => ""
        let rel_path = path.strip_prefix(name).unwrap_or_default();
        let canonical_url = format!("{}/{name}", package.base_url(&self.config));
        let godoc_url = format!("https://{}/{canonical_url}{rel_path}", self.config.godoc.host);

        PackagePage {
            repo: package.repo.clone(),
            branch: package.branch.clone(),
            canonical_url,
            godoc_url,
        }
    }

    fn index_page<'a>(&'a self, listing: &'a HashMap<String, Package>) -> IndexPage<'a> {
        let mut names: Vec<&String> = listing.keys().collect();
        names.sort();

        let entries = names
            .into_iter()
            .map(|name| {
                let package = &listing[name];
                let import_path = format!("{}/{name}", package.base_url(&self.config));
                let godoc_url = format!("https://{}/{import_path}", self.config.godoc.host);
                IndexEntry {
                    import_path,
                    godoc_url,
                    package,
                }
            })
            .collect();

        IndexPage {
            title: &self.config.url,
            entries,
        }
    }
}

async fn serve(State(sally): State<Arc<Sally>>, method: Method, uri: Uri) -> Response {
    // Package keys are matched against the unescaped path, e.g. "/caf%C3%A9" => "/café".
    let path = percent_decode_str(uri.path()).decode_utf8_lossy();
    sally.respond(&method, &path)
}
