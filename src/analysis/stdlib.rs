//! Embedded standard library lists.
//!
//! A reference whose root segment is in its language's set is dropped from
//! dependency output entirely. The lists cover the roots that show up in
//! everyday code; anything missing is reported as a regular dependency.

use phf::{phf_set, Set};

use super::Language;

static GO_STDLIB: Set<&'static str> = phf_set! {
    "archive", "bufio", "bytes", "cmp", "compress", "container", "context",
    "crypto", "database", "debug", "embed", "encoding", "errors", "expvar",
    "flag", "fmt", "go", "hash", "html", "image", "index", "io", "iter",
    "log", "maps", "math", "mime", "net", "os", "path", "plugin", "reflect",
    "regexp", "runtime", "slices", "sort", "strconv", "strings", "sync",
    "syscall", "testing", "text", "time", "unicode", "unique", "unsafe",
};

static RUST_STDLIB: Set<&'static str> = phf_set! {
    "std", "core", "alloc", "proc_macro", "test",
};

static JAVA_STDLIB: Set<&'static str> = phf_set! {
    "java", "javax", "sun",
};

static KOTLIN_STDLIB: Set<&'static str> = phf_set! {
    "kotlin", "kotlinx", "java", "javax", "sun",
};

static PYTHON_STDLIB: Set<&'static str> = phf_set! {
    "__future__", "abc", "argparse", "array", "ast", "asyncio", "base64",
    "binascii", "bisect", "builtins", "calendar", "collections", "concurrent",
    "configparser", "contextlib", "contextvars", "copy", "csv", "ctypes",
    "dataclasses", "datetime", "decimal", "difflib", "email", "enum",
    "errno", "fnmatch", "fractions", "functools", "gc", "getpass", "glob",
    "gzip", "hashlib", "heapq", "hmac", "html", "http", "importlib",
    "inspect", "io", "ipaddress", "itertools", "json", "logging", "math",
    "mimetypes", "multiprocessing", "operator", "os", "pathlib", "pickle",
    "platform", "pprint", "queue", "random", "re", "secrets", "select",
    "shlex", "shutil", "signal", "socket", "sqlite3", "ssl", "stat",
    "statistics", "string", "struct", "subprocess", "sys", "tempfile",
    "textwrap", "threading", "time", "timeit", "traceback", "types",
    "typing", "unittest", "urllib", "uuid", "warnings", "weakref", "xml",
    "zipfile", "zlib",
};

static NODE_BUILTINS: Set<&'static str> = phf_set! {
    "assert", "async_hooks", "buffer", "child_process", "cluster", "console",
    "crypto", "dgram", "dns", "events", "fs", "http", "http2", "https",
    "module", "net", "os", "path", "perf_hooks", "process", "querystring",
    "readline", "stream", "string_decoder", "timers", "tls", "tty", "url",
    "util", "v8", "vm", "worker_threads", "zlib",
};

/// Check whether `root` (the first segment of a reference) belongs to the
/// standard library of `lang`.
pub fn is_stdlib(lang: Language, root: &str) -> bool {
    match lang {
        Language::Go => GO_STDLIB.contains(root),
        Language::Rust => RUST_STDLIB.contains(root),
        Language::Java => JAVA_STDLIB.contains(root),
        Language::Kotlin => KOTLIN_STDLIB.contains(root),
        Language::Python => PYTHON_STDLIB.contains(root),
        Language::TypeScript => root.starts_with("node:") || NODE_BUILTINS.contains(root),
    }
}
