use std::env;
use std::path::Path;

fn main() {
    // 获取项目根目录
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();

    // 基金目录在编译期通过 include_str! 嵌入
    let catalog_file = Path::new(&manifest_dir).join("data").join("funds.json");
    if !catalog_file.exists() {
        println!("cargo:warning=data/funds.json not found. The bundled fund catalog will fail to compile.");
    } else {
        println!("cargo:rerun-if-changed=data/funds.json");
    }
}
