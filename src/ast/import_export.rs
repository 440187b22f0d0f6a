use super::node::Node;
use super::stmt::decl::PatDecl;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub enum ModuleExportImportName {
  Ident(String),
  Str(String),
}

impl ModuleExportImportName {
  pub fn as_str(&self) -> &str {
    match self {
      ModuleExportImportName::Ident(name) | ModuleExportImportName::Str(name) => name,
    }
  }
}

// Exported names are not variable usages: `export {a} from "m"` never touches
// a local `a`, and a plain `export {a}` refers to the module binding by name
// at link time. Both sides therefore stay raw names.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportName {
  #[drive(skip)]
  pub exportable: ModuleExportImportName,
  #[drive(skip)]
  pub alias: Option<ModuleExportImportName>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ExportNames {
  // `export * from "module"`
  // `export * as name from "module"`
  #[drive(skip)]
  All(Option<String>),
  // `export {a as default, b as c, d, "e" as f}`
  // `export {default, a as b, c} from "module"`
  // `default` is still a name, so we don't use an enum.
  Specific(Vec<Node<ExportName>>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportName {
  #[drive(skip)]
  pub importable: ModuleExportImportName,
  // This is always set, even when no explicit alias is provided. This is for simplicity for downstream tasks, as an implicit alias hides the implicit IdPat decl.
  // PatDecl always contains IdPat.
  pub alias: Node<PatDecl>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ImportNames {
  // `import * as name`
  // PatDecl always contains IdPat.
  All(Node<PatDecl>),
  // `import {a as b, c, default as e}`
  // `default` is still a name, so we don't use an enum.
  Specific(Vec<Node<ImportName>>),
}
