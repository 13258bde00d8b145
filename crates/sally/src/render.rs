//! HTML pages served to `go get` and to people browsing the server.

use crate::config::Package;
use html_escape::encode_quoted_attribute as escape_html;

/// Page for a path that resolves to a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PackagePage {
    pub repo: String,
    pub branch: String,
    pub canonical_url: String,
    pub godoc_url: String,
}

impl PackagePage {
    pub(crate) fn render(&self) -> String {
        let repo = escape_html(&self.repo);
        let branch = escape_html(&self.branch);
        let canonical = escape_html(&self.canonical_url);
        let godoc = escape_html(&self.godoc_url);

        format!(
            r#"<!DOCTYPE html>
<html>
  <head>
    <meta name="go-import" content="{canonical} git https://{repo}">
    <meta name="go-source" content="{canonical} https://{repo} https://{repo}/tree/{branch}{{/dir}} https://{repo}/tree/{branch}{{/dir}}/{{file}}#L{{line}}">
    <meta http-equiv="refresh" content="0; url={godoc}">
  </head>
  <body>
    Nothing to see here. Please <a href="{godoc}">move along</a>.
  </body>
</html>
"#
        )
    }
}

/// One row of the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexEntry<'a> {
    pub import_path: String,
    pub godoc_url: String,
    pub package: &'a Package,
}

/// Listing of every package at or below the requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexPage<'a> {
    pub title: &'a str,
    pub entries: Vec<IndexEntry<'a>>,
}

impl IndexPage<'_> {
    pub(crate) fn render(&self) -> String {
        let rows: String = self.entries.iter().map(render_row).collect();

        format!(
            r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
  </head>
  <body>
    <table>
      <tr>
        <th>Package</th>
        <th>Source</th>
        <th>Documentation</th>
      </tr>{rows}
    </table>
  </body>
</html>
"#,
            title = escape_html(self.title),
        )
    }
}

fn render_row(entry: &IndexEntry<'_>) -> String {
    let description = if entry.package.description.is_empty() {
        String::new()
    } else {
        format!(
            "\n          <div class=\"description\">{}</div>",
            escape_html(&entry.package.description)
        )
    };

    format!(
        r#"
      <tr>
        <td>
          <div class="import-path">{import_path}</div>{description}
        </td>
        <td><a href="https://{repo}">{repo}</a></td>
        <td><a href="{godoc}">Reference</a></td>
      </tr>"#,
        import_path = escape_html(&entry.import_path),
        repo = escape_html(&entry.package.repo),
        godoc = escape_html(&entry.godoc_url),
    )
}
