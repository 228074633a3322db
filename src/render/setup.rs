//! setup.py renderer
//!
//! Produces a `setup.py` straight from the declarative model so the file
//! never needs hand edits. Vendored requirements are install-time only and
//! deliberately never leak into `install_requires`.

use crate::render::{FileToRender, RenderContext, Renderer};
use crate::model::author::Author;
use crate::model::package::PackageModel;
use crate::model::requirements::RequirementsList;
use crate::model::version::Version;

pub struct SetupRenderer;

const GENERATED_HEADER: &str = "\
# This file was automatically generated by wharf. Manual changes will be\n\
# overwritten on the next update; edit package.toml instead.\n";

impl Renderer for SetupRenderer {
  fn name(&self) -> &'static str {
    "setup"
  }

  fn render(&self, ctx: &RenderContext<'_>) -> Vec<FileToRender> {
    let package = ctx.package;
    let mut files = vec![FileToRender {
      package: Some(package.name().to_string()),
      path: package.directory().join("setup.py"),
      content: render_setup_py(ctx),
    }];

    if package.data.typed {
      if let Some(module_dir) = module_directory(package) {
        files.push(FileToRender {
          package: Some(package.name().to_string()),
          path: module_dir.join("py.typed"),
          content: String::new(),
        });
      }
    }

    files
  }
}

/// The module's directory under the source directory, if it is a directory
/// module at all (single-file modules have none)
fn module_directory(package: &PackageModel) -> Option<std::path::PathBuf> {
  let mut dir = package.directory().join(&package.data.source_directory);
  for part in package.data.modulename().split('.') {
    dir = dir.join(part);
  }
  dir.is_dir().then_some(dir)
}

fn render_setup_py(ctx: &RenderContext<'_>) -> String {
  let package = ctx.package;
  let data = &package.data;
  // Fields the package leaves unset fall back to the monorepo's metadata.
  let mono = ctx.monorepo.map(|m| &m.data);
  let version: Option<&Version> = data.version.as_ref().or_else(|| {
    mono
      .filter(|m| m.single_version)
      .and_then(|m| m.version.as_ref())
  });
  let author: Option<&Author> = data.author.as_ref().or_else(|| mono.and_then(|m| m.author.as_ref()));
  let license: Option<&String> = data.license.as_ref().or_else(|| mono.and_then(|m| m.license.as_ref()));
  let url: Option<&String> = data.url.as_ref().or_else(|| mono.and_then(|m| m.url.as_ref()));

  let mut out = String::from(GENERATED_HEADER);
  out.push('\n');
  out.push_str("import io\nimport setuptools\n\n");

  let readme = package.readme_file().and_then(|file| {
    let relative = file
      .strip_prefix(package.directory())
      .map(|p| p.to_string_lossy().to_string())
      .ok()?;
    Some((relative, readme_content_type(&file.to_string_lossy())))
  });

  if let Some((path, _)) = &readme {
    out.push_str(&format!(
      "with io.open({}, encoding='utf8') as fp:\n  long_description = fp.read()\n\n",
      py_str(path)
    ));
  }

  let mut kwargs: Vec<(&str, String)> = Vec::new();
  kwargs.push(("name", py_str(&data.name)));
  if let Some(version) = version {
    kwargs.push(("version", py_str(&version.to_string())));
  }
  if let Some(author) = author {
    kwargs.push(("author", py_str(&author.name)));
    if let Some(email) = &author.email {
      kwargs.push(("author_email", py_str(email)));
    }
  }
  if let Some(description) = &data.description {
    kwargs.push(("description", py_str(description)));
  }
  if let Some((_, content_type)) = &readme {
    kwargs.push(("long_description", "long_description".to_string()));
    kwargs.push(("long_description_content_type", py_str(content_type)));
  }
  if let Some(url) = url {
    kwargs.push(("url", py_str(url)));
  }
  if let Some(license) = license {
    kwargs.push(("license", py_str(license)));
  }

  let source = &data.source_directory;
  if module_directory(package).is_some() {
    let mut excludes = Vec::new();
    for pattern in &data.exclude {
      excludes.push(pattern.clone());
      excludes.push(format!("{}.*", pattern));
    }
    kwargs.push((
      "packages",
      format!("setuptools.find_packages({}, {})", py_str(source), py_str_list(&excludes)),
    ));
  } else {
    kwargs.push(("py_modules", py_str_list(&[data.modulename()])));
  }
  kwargs.push(("package_dir", format!("{{'': {}}}", py_str(source))));
  if data.typed {
    kwargs.push((
      "package_data",
      format!("{{{}: ['py.typed']}}", py_str(&data.modulename())),
    ));
    kwargs.push(("zip_safe", "False".to_string()));
  }

  kwargs.push(("install_requires", pip_args_literal(&data.requirements)));
  if !data.test_requirements.is_empty() {
    kwargs.push(("tests_require", pip_args_literal(&data.test_requirements)));
  }

  let mut extras: Vec<(String, String)> = Vec::new();
  if !data.test_requirements.is_empty() {
    extras.push(("test".to_string(), pip_args_literal(&data.test_requirements)));
  }
  for (name, reqs) in &data.extra_requirements {
    extras.push((name.clone(), pip_args_literal(reqs)));
  }
  if !extras.is_empty() {
    let inner: Vec<String> = extras
      .iter()
      .map(|(name, value)| format!("{}: {}", py_str(name), value))
      .collect();
    kwargs.push(("extras_require", format!("{{{}}}", inner.join(", "))));
  }

  if !data.entrypoints.is_empty() {
    let mut groups = Vec::new();
    for (group, specs) in &data.entrypoints {
      groups.push(format!("    {}: {},", py_str(group), py_str_list(specs)));
    }
    kwargs.push(("entry_points", format!("{{\n{}\n  }}", groups.join("\n"))));
  }

  if !data.classifiers.is_empty() {
    kwargs.push(("classifiers", py_str_list(&data.classifiers)));
  }
  if !data.keywords.is_empty() {
    kwargs.push(("keywords", py_str_list(&data.keywords)));
  }

  out.push_str("setuptools.setup(\n");
  for (key, value) in kwargs {
    out.push_str(&format!("  {}={},\n", key, value));
  }
  out.push_str(")\n");
  out
}

fn readme_content_type(filename: &str) -> &'static str {
  if filename.ends_with(".md") {
    "text/markdown"
  } else if filename.ends_with(".rst") {
    "text/x-rst"
  } else {
    "text/plain"
  }
}

/// Registry requirements as a Python list literal; vendored entries are not
/// representable in setup.py and are skipped
fn pip_args_literal(reqs: &RequirementsList) -> String {
  let args: Vec<String> = reqs.registry_reqs().map(|r| r.to_pip_arg()).collect();
  py_str_list(&args)
}

fn py_str(s: &str) -> String {
  format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn py_str_list<S: AsRef<str>>(items: &[S]) -> String {
  let quoted: Vec<String> = items.iter().map(|i| py_str(i.as_ref())).collect();
  format!("[{}]", quoted.join(", "))
}
