mod loader_tests;
mod parse_tests;
mod validation_tests;

use std::fs;
use std::path::Path;

pub(super) const ENTRYPOINT: &str = r#"
version = 1

backend = {
  base_url        = "http://127.0.0.1:19001/clickvisual"
  timeout_seconds = 10
}

admission = {
  grace_seconds = 300
  locale        = "en"
}

include = {
  policies = "policies/*.hcl"
}
"#;

pub(super) const SEARCH_POLICY: &str = r#"
search_policy = {
  enable = true
  pattern_rules = [
    { trigger = "like", limit = { hours = 2 } },
  ]
  default_limit = { days = 7 }
}
"#;

pub(super) fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
