//! Integration tests for kiln-cli.

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn kiln(tmp: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("kiln");
    cmd.current_dir(tmp.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_flag() {
    let tmp = TempDir::new().unwrap();
    kiln(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("favicon"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version_flag() {
    let tmp = TempDir::new().unwrap();
    kiln(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_build_command_help() {
    let tmp = TempDir::new().unwrap();
    kiln(&tmp)
        .args(["build", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--path"))
        .stdout(predicate::str::contains("--source"))
        .stdout(predicate::str::contains("--deploy"))
        .stdout(predicate::str::contains("--reuse"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    kiln(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kiln"));
}

#[test]
fn test_init_writes_then_refuses_to_overwrite() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("conf/kiln.toml");

    kiln(&tmp)
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .success();

    let text = fs::read_to_string(&config).unwrap();
    assert!(text.contains("[tools]"));
    assert!(text.contains("sass = \"sass\""));

    kiln(&tmp)
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    kiln(&tmp)
        .arg("--config")
        .arg(&config)
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_get_reads_file_and_env() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("kiln.toml");
    fs::write(&config, "[tools]\nsass = \"npx sass\"\n").unwrap();

    kiln(&tmp)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "tools.sass"])
        .assert()
        .success()
        .stdout(predicate::str::contains("npx sass"));

    kiln(&tmp)
        .arg("--config")
        .arg(&config)
        .env("KILN_TOOLS__SASS", "dart-sass")
        .args(["config", "get", "tools.sass"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dart-sass"));
}

#[test]
fn test_config_path_echoes_explicit_file() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("kiln.toml");
    fs::write(&config, "").unwrap();

    kiln(&tmp)
        .arg("--config")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kiln.toml"));
}

// ── end to end with stand-in tools ────────────────────────────────────────────

#[cfg(unix)]
fn write_site(root: &Path) {
    let files = [
        ("dev/views/index.tpl", "<h1>home</h1>"),
        ("dev/views/about.tpl", "<h1>about</h1>"),
        (
            "dev/views/~head.tpl",
            "<head>\n<meta name=\"favicon_resources\">\n<meta name=\"open_graph\">\n<meta name=\"style_sheets\">\n</head>\n",
        ),
        ("dev/views/~footer.tpl", "<footer></footer>\n"),
        ("dev/sass/styles.scss", "body{color:red}"),
        ("dev/sass/non-critical/fonts.scss", "@font-face{}"),
        ("res/favicon.svg", "<svg/>"),
        ("res/img/logo.png", "PNG"),
    ];
    for (rel, content) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

/// Shell scripts that honour the argument shapes of sass, inkscape and convert.
#[cfg(unix)]
fn write_tools(dir: &Path) -> std::path::PathBuf {
    let sass = dir.join("sass.sh");
    fs::write(&sass, "for last; do :; done\ncat \"$last\"\n").unwrap();

    let inkscape = dir.join("inkscape.sh");
    fs::write(
        &inkscape,
        "for a; do case \"$a\" in --export-filename=*) out=\"${a#--export-filename=}\";; esac; done\nprintf PNG > \"$out\"\n",
    )
    .unwrap();

    let convert = dir.join("convert.sh");
    fs::write(&convert, "for last; do :; done\nprintf ICO > \"$last\"\n").unwrap();

    let config = dir.join("kiln.toml");
    fs::write(
        &config,
        format!(
            "[tools]\nsass = \"sh {}\"\nrasterizer = \"sh {}\"\nicon_packer = \"sh {}\"\n",
            sass.display(),
            inkscape.display(),
            convert.display()
        ),
    )
    .unwrap();
    config
}

#[cfg(unix)]
#[test]
fn test_build_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let site = tmp.path().join("site");
    write_site(&site);
    let config = write_tools(tmp.path());

    let assert = kiln(&tmp)
        .arg("--config")
        .arg(&config)
        .args(["--output-format", "json", "build", "--source", "site", "--path", "out"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["routes"]["main"], 2);
    assert_eq!(report["favicons"]["rendered"], 17);
    assert_eq!(report["favicons"]["packed"], true);

    let www = tmp.path().join("out/www");
    let app = fs::read_to_string(www.join("app.py")).unwrap();
    assert!(app.contains("def load_root():"));
    assert!(app.contains("@route('/about')"));
    assert!(app.contains("return static_file('logo.png', root='static/img')"));

    let index = fs::read_to_string(www.join("views/index.tpl")).unwrap();
    assert!(index.starts_with("<%\nembeded_css = \"body{color:red}\"\n%>\n"));
    assert!(!www.join("static/css/critical").exists());
    assert!(www.join("static/css/fonts.css").exists());

    let footer = fs::read_to_string(www.join("views/~footer.tpl")).unwrap();
    assert!(footer.contains("href=\"/fonts.css\""));

    let head = fs::read_to_string(www.join("views/~head.tpl")).unwrap();
    assert!(head.contains("<link rel=\"shortcut icon\" href=\"favicon.ico\">"));
    assert!(head.contains("og:image"));

    assert_eq!(
        fs::read_to_string(www.join("static/favicon/favicon.ico")).unwrap(),
        "ICO"
    );
    assert!(!site.join("dev/sass/_all.scss").exists());
}

#[cfg(unix)]
#[test]
fn test_favicon_command_writes_head_fragment() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("icon.svg"), "<svg/>").unwrap();
    let config = write_tools(tmp.path());

    kiln(&tmp)
        .arg("--config")
        .arg(&config)
        .args(["favicon", "icon.svg", "public"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Favicons written to"));

    let dest = tmp.path().join("public/favicon");
    assert!(dest.join("favicon.ico").exists());
    assert!(dest.join("apple-touch-icon-180x180.png").exists());
    assert!(!dest.join("favicon-24x24.png").exists());
    let head = fs::read_to_string(dest.join("head.html")).unwrap();
    assert!(head.contains("touch-icon-192x192.png"));
}
