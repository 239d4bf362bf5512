//! Module specifier resolution against a known module set.
//!
//! Only relative specifiers (`./x`, `../x`) are resolved. Bare package
//! specifiers always come back unresolved, so anything imported from outside
//! the analyzed tree drops out of the graph instead of failing the run.

use std::path::Path;

use path_clean::PathClean;
use rustc_hash::FxHashSet as HashSet;

use super::ModuleId;

/// Extensions tried, in order, when a specifier omits one.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "d.ts", "js", "jsx", "mjs", "cjs", "mts", "cts"];

/// JavaScript output extensions that may be written in place of their TypeScript source.
const JS_TO_TS: &[(&str, &[&str])] = &[
    ("js", &["ts", "tsx"]),
    ("jsx", &["tsx"]),
    ("mjs", &["mts"]),
    ("cjs", &["cts"]),
];

/// Maps `(importing module, specifier)` to a module key.
pub trait SpecifierResolver {
    /// Resolve `specifier` as written in `from`, or `None` when it does not
    /// name a known module.
    fn resolve(&self, from: &ModuleId, specifier: &str) -> Option<ModuleId>;
}

/// Returns true for `./` and `../` style specifiers.
pub fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// The universe of known modules.
#[derive(Debug, Clone)]
pub struct ModuleSet {
    modules: HashSet<ModuleId>,
    extensions: Vec<String>,
}

impl Default for ModuleSet {
    fn default() -> Self {
        Self {
            modules: HashSet::default(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

impl ModuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a module set from ids using the default extension list.
    pub fn from_modules<I>(modules: I) -> Self
    where
        I: IntoIterator<Item = ModuleId>,
    {
        let mut set = Self::default();
        set.modules.extend(modules);
        set
    }

    /// Replace the extension list (entries without a leading dot).
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn insert(&mut self, module: ModuleId) -> bool {
        self.modules.insert(module)
    }

    pub fn contains(&self, module: &ModuleId) -> bool {
        self.modules.contains(module)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn lookup(&self, candidate: &str) -> Option<ModuleId> {
        let id = ModuleId::new(candidate).ok()?;
        self.modules.contains(&id).then_some(id)
    }

    /// Candidate paths for `base`, in resolution order.
    fn candidates(&self, base: &str) -> Vec<String> {
        let mut candidates = Vec::with_capacity(self.extensions.len() * 2 + 3);
        candidates.push(base.to_string());

        for ext in &self.extensions {
            candidates.push(format!("{base}.{ext}"));
        }

        for ext in &self.extensions {
            if base.is_empty() {
                candidates.push(format!("index.{ext}"));
            } else {
                candidates.push(format!("{base}/index.{ext}"));
            }
        }

        // `./foo.js` written against a `foo.ts` source
        if let Some((stem, ext)) = base.rsplit_once('.') {
            if let Some((_, twins)) = JS_TO_TS.iter().find(|(js, _)| *js == ext) {
                for twin in *twins {
                    candidates.push(format!("{stem}.{twin}"));
                }
            }
        }

        candidates
    }
}

impl SpecifierResolver for ModuleSet {
    fn resolve(&self, from: &ModuleId, specifier: &str) -> Option<ModuleId> {
        if !is_relative(specifier) {
            return None;
        }

        let joined = Path::new(from.parent()).join(specifier).clean();
        let base = joined.to_string_lossy().replace('\\', "/");
        // `clean` turns an empty path into "."
        let base = if base == "." { String::new() } else { base };

        if base.starts_with("../") || base == ".." {
            return None;
        }

        self.candidates(&base)
            .iter()
            .find_map(|candidate| self.lookup(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(path: &str) -> ModuleId {
        ModuleId::new(path).unwrap()
    }

    fn set(paths: &[&str]) -> ModuleSet {
        ModuleSet::from_modules(paths.iter().map(|p| id(p)))
    }

    #[test]
    fn resolves_extensionless_specifiers() {
        let modules = set(&["src/a.ts", "src/utils.tsx"]);
        assert_eq!(
            modules.resolve(&id("src/a.ts"), "./utils"),
            Some(id("src/utils.tsx"))
        );
    }

    #[test]
    fn resolves_verbatim_before_extensions() {
        let modules = set(&["src/a.ts", "src/b.js", "src/b.js.ts"]);
        assert_eq!(modules.resolve(&id("src/a.ts"), "./b.js"), Some(id("src/b.js")));
    }

    #[test]
    fn resolves_parent_directories_and_index_files() {
        let modules = set(&["src/feature/a.ts", "src/shared/index.ts"]);
        assert_eq!(
            modules.resolve(&id("src/feature/a.ts"), "../shared"),
            Some(id("src/shared/index.ts"))
        );
    }

    #[test]
    fn resolves_js_specifiers_to_typescript_sources() {
        let modules = set(&["src/a.ts", "src/b.ts"]);
        assert_eq!(modules.resolve(&id("src/a.ts"), "./b.js"), Some(id("src/b.ts")));
    }

    #[test]
    fn bare_specifiers_are_unresolved() {
        let modules = set(&["src/a.ts", "react.ts"]);
        assert_eq!(modules.resolve(&id("src/a.ts"), "react"), None);
        assert_eq!(modules.resolve(&id("src/a.ts"), "@scope/pkg"), None);
    }

    #[test]
    fn specifiers_escaping_the_root_are_unresolved() {
        let modules = set(&["a.ts"]);
        assert_eq!(modules.resolve(&id("a.ts"), "../a"), None);
    }

    #[test]
    fn respects_custom_extensions() {
        let modules = set(&["src/a.ts", "src/b.vue"]).with_extensions(["vue"]);
        assert_eq!(modules.resolve(&id("src/a.ts"), "./b"), Some(id("src/b.vue")));
        assert_eq!(modules.extensions(), ["vue".to_string()]);
    }

    #[test]
    fn top_level_modules_resolve_siblings() {
        let modules = set(&["index.ts", "utils/index.ts"]);
        assert_eq!(
            modules.resolve(&id("index.ts"), "./utils"),
            Some(id("utils/index.ts"))
        );
    }
}
