// FolderAlias - Folder display-name editor
// Reads and writes the LocalizedResourceName entry of a folder's desktop.ini

use std::process;

fn main() {
    if let Err(e) = folderalias::run() {
        eprintln!("{}", e);
        process::exit(1);
    }
}
