//! Identify-style file tags
//!
//! Hooks filter files with tags such as `python`, `yaml` or `text`. Tags are
//! derived from the file name alone; file contents and permissions are not
//! inspected, so `executable` and shebang based tags are never produced.

use std::collections::BTreeSet;
use std::path::Path;

/// Extension -> tags (besides `file` and `text`/`binary`)
const EXTENSIONS: &[(&str, &[&str])] = &[
    ("py", &["python"]),
    ("pyi", &["pyi"]),
    ("pyx", &["cython"]),
    ("pxd", &["cython"]),
    ("yaml", &["yaml"]),
    ("yml", &["yaml"]),
    ("json", &["json"]),
    ("toml", &["toml"]),
    ("md", &["markdown"]),
    ("markdown", &["markdown"]),
    ("rst", &["rst"]),
    ("txt", &["plain-text"]),
    ("cfg", &["ini"]),
    ("ini", &["ini"]),
    ("sh", &["shell", "sh"]),
    ("bash", &["shell", "bash"]),
    ("zsh", &["shell", "zsh"]),
    ("rs", &["rust"]),
    ("js", &["javascript"]),
    ("mjs", &["javascript"]),
    ("jsx", &["jsx"]),
    ("ts", &["ts"]),
    ("tsx", &["tsx"]),
    ("html", &["html"]),
    ("htm", &["html"]),
    ("css", &["css"]),
    ("scss", &["scss"]),
    ("xml", &["xml"]),
    ("sql", &["sql"]),
    ("go", &["go"]),
    ("c", &["c"]),
    ("h", &["header", "c"]),
    ("cpp", &["c++"]),
    ("hpp", &["header", "c++"]),
    ("java", &["java"]),
    ("rb", &["ruby"]),
    ("lock", &[]),
    ("csv", &["csv"]),
    ("svg", &["svg", "image", "xml"]),
];

/// Binary extensions
const BINARY_EXTENSIONS: &[(&str, &[&str])] = &[
    ("png", &["image", "png"]),
    ("jpg", &["image", "jpeg"]),
    ("jpeg", &["image", "jpeg"]),
    ("gif", &["image", "gif"]),
    ("ico", &["image", "icon"]),
    ("pdf", &["pdf"]),
    ("zip", &["zip"]),
    ("gz", &["gzip"]),
    ("whl", &["wheel", "zip"]),
    ("pyc", &["pyc"]),
    ("so", &["shared-object"]),
    ("woff", &["woff"]),
    ("woff2", &["woff2"]),
];

/// Well-known file names that have no (useful) extension
const NAMES: &[(&str, &[&str])] = &[
    ("Dockerfile", &["dockerfile"]),
    ("Makefile", &["makefile"]),
    ("makefile", &["makefile"]),
    ("setup.cfg", &["ini"]),
    ("tox.ini", &["ini", "tox"]),
    (".gitignore", &["gitignore"]),
    (".gitattributes", &["gitattributes"]),
    (".editorconfig", &["editorconfig"]),
    ("LICENSE", &["plain-text"]),
    ("README", &["plain-text"]),
    ("Pipfile", &["toml"]),
];

/// Tags that apply to whole classes of files
const GENERIC: &[&str] = &[
    "file",
    "text",
    "binary",
    "directory",
    "symlink",
    "executable",
    "non-executable",
];

/// Tags assigned to `path` based on its name
pub fn tags_for_path(path: &str) -> BTreeSet<&'static str> {
    let mut tags = BTreeSet::new();
    tags.insert("file");

    let file_name = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path);

    if let Some((_, named)) = NAMES.iter().find(|(name, _)| *name == file_name) {
        tags.insert("text");
        tags.extend(named.iter().copied());
        return tags;
    }

    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some(ext) => {
            if let Some((_, found)) = BINARY_EXTENSIONS.iter().find(|(e, _)| *e == ext) {
                tags.insert("binary");
                tags.extend(found.iter().copied());
            } else {
                tags.insert("text");
                if let Some((_, found)) = EXTENSIONS.iter().find(|(e, _)| *e == ext) {
                    tags.extend(found.iter().copied());
                }
            }
        }
        None => {
            tags.insert("text");
        }
    }

    tags
}

/// Whether `tag` can ever be produced (or is a generic identify tag)
pub fn is_known_tag(tag: &str) -> bool {
    GENERIC.contains(&tag)
        || EXTENSIONS
            .iter()
            .chain(BINARY_EXTENSIONS)
            .chain(NAMES)
            .any(|(_, tags)| tags.contains(&tag))
}
