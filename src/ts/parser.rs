use crate::ts::errors::TreeSitterError;
use crate::ts::node::CppNode;
use ast_grep_language::{LanguageExt, SupportLang};
use std::path::{Path, PathBuf};
use tree_sitter::{Parser, Tree};

/// Grammar used for a translation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceLanguage {
    C,
    #[default]
    Cpp,
}

impl SourceLanguage {
    /// Pick the grammar from compiler arguments and the file name.
    ///
    /// Priority: `-x <lang>`, then `-std=`, then the compiler executable, then
    /// the file extension. Anything undecided is C++.
    pub fn detect(arguments: &[String], file: &Path) -> Self {
        if let Some(language) = explicit_language(arguments) {
            return language;
        }
        if let Some(language) = standard_language(arguments) {
            return language;
        }

        let compiler = arguments.first().map(|arg| compiler_name(arg));
        if let Some(name) = &compiler {
            if name.contains("++") || name == "cl" || name == "clang-cl" {
                return SourceLanguage::Cpp;
            }
        }

        match file.extension().and_then(|ext| ext.to_str()) {
            Some("c") => SourceLanguage::C,
            Some("h") if compiler.as_deref().is_some_and(is_c_compiler) => SourceLanguage::C,
            _ => SourceLanguage::Cpp,
        }
    }

    pub fn support_lang(self) -> SupportLang {
        match self {
            SourceLanguage::C => SupportLang::C,
            SourceLanguage::Cpp => SupportLang::Cpp,
        }
    }
}

fn explicit_language(arguments: &[String]) -> Option<SourceLanguage> {
    let mut language = None;
    let mut iter = arguments.iter();
    while let Some(arg) = iter.next() {
        let value = match arg.strip_prefix("-x") {
            Some("") => iter.next().map(String::as_str),
            Some(attached) => Some(attached),
            None => None,
        };
        match value {
            Some("c" | "c-header" | "cpp-output") => language = Some(SourceLanguage::C),
            Some("c++" | "c++-header" | "c++-cpp-output") => language = Some(SourceLanguage::Cpp),
            _ => {}
        }
    }
    language
}

fn standard_language(arguments: &[String]) -> Option<SourceLanguage> {
    arguments.iter().rev().find_map(|arg| {
        let standard = arg.strip_prefix("-std=").or_else(|| arg.strip_prefix("/std:"))?;
        if standard.contains("++") {
            Some(SourceLanguage::Cpp)
        } else if ["c", "gnu", "iso9899"]
            .iter()
            .any(|prefix| standard.starts_with(prefix))
        {
            Some(SourceLanguage::C)
        } else {
            None
        }
    })
}

/// Executable name without directory, `.exe` or a trailing `-<version>`.
fn compiler_name(arg: &str) -> String {
    let name = Path::new(arg)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(arg);
    let name = name.strip_suffix(".exe").unwrap_or(name);
    match name.rsplit_once('-') {
        Some((base, version)) if version.chars().all(|c| c.is_ascii_digit() || c == '.') => {
            base.to_string()
        }
        _ => name.to_string(),
    }
}

fn is_c_compiler(name: &str) -> bool {
    matches!(name, "cc" | "gcc" | "clang") || name.ends_with("-gcc")
}

/// Tree-sitter parser for C and C++ translation units.
pub struct SourceParser {
    parser: Parser,
    language: Option<SourceLanguage>,
}

impl SourceParser {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            language: None,
        }
    }

    fn set_language(&mut self, language: SourceLanguage) -> Result<(), TreeSitterError> {
        if self.language == Some(language) {
            return Ok(());
        }
        let ts_lang = language.support_lang().get_ts_language();
        self.parser
            .set_language(&ts_lang)
            .map_err(|_| TreeSitterError::LanguageSet)?;
        self.language = Some(language);
        Ok(())
    }

    /// Parse in-memory source. `path` is only used to label positions.
    pub fn parse_source(
        &mut self,
        path: impl Into<PathBuf>,
        source: String,
        language: SourceLanguage,
    ) -> Result<ParsedSource, TreeSitterError> {
        let path = path.into();
        self.set_language(language)?;
        let tree = self
            .parser
            .parse(&source, None)
            .ok_or_else(|| TreeSitterError::ParseFailed { path: path.clone() })?;

        Ok(ParsedSource {
            path,
            source,
            tree,
            language,
        })
    }

    /// Read and parse `file` with the grammar the compile arguments select.
    ///
    /// Positions in the resulting tree are labelled with `display_path`.
    pub fn parse_file(
        &mut self,
        display_path: &Path,
        file: &Path,
        arguments: &[String],
    ) -> Result<ParsedSource, TreeSitterError> {
        let source = std::fs::read_to_string(file).map_err(|source| TreeSitterError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        let language = SourceLanguage::detect(arguments, file);
        self.parse_source(display_path, source, language)
    }
}

impl Default for SourceParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed translation unit with its source text.
#[derive(Debug)]
pub struct ParsedSource {
    pub path: PathBuf,
    pub source: String,
    pub tree: Tree,
    pub language: SourceLanguage,
}

impl ParsedSource {
    /// Root of the declaration view over the tree.
    pub fn root(&self) -> CppNode<'_> {
        CppNode::root(self)
    }

    /// Check if the tree contains any ERROR or MISSING nodes.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Number of ERROR and MISSING nodes in the tree.
    pub fn error_count(&self) -> usize {
        let mut cursor = self.tree.walk();
        let mut count = 0;

        loop {
            let node = cursor.node();
            if node.is_error() || node.is_missing() {
                count += 1;
            }
            if node.has_error() && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return count;
                }
            }
        }
    }
}
