use std::fs;
use std::path::Path;

fn watch(dir: &Path) {
	let Ok(entries) = fs::read_dir(dir) else { return };
	for entry in entries.flatten() {
		let path = entry.path();
		println!("cargo:rerun-if-changed={}", path.display());
		if path.is_dir() {
			watch(&path);
		}
	}
}

fn main() {
	watch(Path::new("fixtures"));
}
