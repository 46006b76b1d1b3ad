use crate::Field;

/// Call site of a log statement, reduced to base names.
///
/// Built by the [`caller_info!`](crate::caller_info) macro, which expands in
/// the calling function so no stack walking is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerInfo {
    func: String,
    file: String,
    line: u32,
}

impl CallerInfo {
    /// Reduce a function path and a source path to their last component.
    ///
    /// Returns `None` when the function name is unknown or empty, or when the
    /// file has no final component: the record is then logged without caller
    /// fields.
    #[must_use]
    pub fn resolve(func: Option<&str>, file: &str, line: u32) -> Option<Self> {
        let func = func.map(base_func_name).filter(|f| !f.is_empty())?;
        let file = base_file_name(file);
        if file.is_empty() {
            return None;
        }
        Some(Self {
            func: func.to_owned(),
            file: file.to_owned(),
            line,
        })
    }

    #[must_use]
    pub fn func(&self) -> &str {
        &self.func
    }

    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// The `func`, `file` and `line` fields, in that order.
    #[must_use]
    pub fn fields(&self) -> [Field; 3] {
        [
            Field::string("func", self.func.clone()),
            Field::string("file", self.file.clone()),
            Field::int("line", i64::from(self.line)),
        ]
    }
}

/// Fields for an optional caller, empty when capture failed.
pub(crate) fn caller_fields(caller: Option<&CallerInfo>) -> Vec<Field> {
    caller.map(|c| c.fields().to_vec()).unwrap_or_default()
}

fn base_func_name(func: &str) -> &str {
    func.rsplit("::")
        .find(|part| *part != "{{closure}}")
        .unwrap_or_default()
}

fn base_file_name(file: &str) -> &str {
    file.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_base_names() {
        let caller =
            CallerInfo::resolve(Some("selog::facade::tests::run"), "crate/selog/src/facade.rs", 42)
                .unwrap();
        assert_eq!(caller.func(), "run");
        assert_eq!(caller.file(), "facade.rs");
        assert_eq!(caller.line(), 42);
    }

    #[test]
    fn test_resolve_windows_path() {
        let caller = CallerInfo::resolve(Some("main"), r"src\bin\main.rs", 1).unwrap();
        assert_eq!(caller.file(), "main.rs");
    }

    #[test]
    fn test_resolve_skips_closures() {
        let caller =
            CallerInfo::resolve(Some("app::handler::{{closure}}::{{closure}}"), "x.rs", 9).unwrap();
        assert_eq!(caller.func(), "handler");
    }

    #[test]
    fn test_resolve_failure_yields_nothing() {
        assert!(CallerInfo::resolve(None, "x.rs", 1).is_none());
        assert!(CallerInfo::resolve(Some(""), "x.rs", 1).is_none());
        assert!(CallerInfo::resolve(Some("f"), "src/", 1).is_none());
        assert!(caller_fields(None).is_empty());
    }

    #[test]
    fn test_caller_fields() {
        let caller = CallerInfo::resolve(Some("f"), "a/b.rs", 3).unwrap();
        let rendered: Vec<String> = caller_fields(Some(&caller))
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, ["func=f", "file=b.rs", "line=3"]);
    }

    #[test]
    fn test_macro_capture() {
        let caller = crate::caller_info!().unwrap();
        assert_eq!(caller.func(), "test_macro_capture");
        assert_eq!(caller.file(), "caller.rs");
        assert!(!caller.func().contains("::"));
    }
}
