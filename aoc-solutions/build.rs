//! Generates one `mod` declaration per `src/solutions/day_NN.rs` file, so a new
//! day only needs its file to be dropped in the directory.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

fn main() {
    let manifest_dir = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR"));
    let solutions_dir = manifest_dir.join("src").join("solutions");
    println!("cargo:rerun-if-changed={}", solutions_dir.display());

    let mut days: Vec<(u8, PathBuf)> = fs::read_dir(&solutions_dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter_map(|path| {
                    let name = path.file_name()?.to_str()?;
                    let day = name
                        .strip_prefix("day_")?
                        .strip_suffix(".rs")?
                        .parse::<u8>()
                        .ok()
                        .filter(|day| *day > 0)?;
                    // Only the zero-padded form counts, `day_1.rs` is ignored
                    (name == format!("day_{:02}.rs", day)).then_some((day, path))
                })
                .collect()
        })
        .unwrap_or_default();
    days.sort();

    let mut generated = String::new();
    for (day, path) in &days {
        writeln!(generated, "#[path = {:?}]", path.display().to_string()).expect("write to String");
        writeln!(generated, "pub mod day_{:02};", day).expect("write to String");
    }

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR"));
    fs::write(out_dir.join("solutions.rs"), generated).expect("write generated module list");
}
