use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};
use usvg::fontdb::Database;

/// Font database shared by every render of a build.
///
/// System fonts are loaded first, then any extra font files; generic
/// `sans-serif` is mapped to the first family found so labels never depend on
/// a platform alias.
pub fn font_database<P: AsRef<Path>>(extra_files: &[P], system: bool) -> Arc<Database> {
    let mut fontdb = Database::new();
    if system {
        fontdb.load_system_fonts();
    }
    for path in extra_files {
        let path = path.as_ref();
        if let Err(err) = fontdb.load_font_file(path) {
            warn!(path = %path.display(), error = %err, "font file not loaded");
        }
    }
    let family_name = {
        let mut it = fontdb.faces();
        if let Some(face) = it.next() {
            face.families.first().map(|(n, _)| n.clone())
        } else {
            None
        }
    };
    if let Some(name) = family_name {
        debug!(family = %name, "sans-serif family");
        fontdb.set_sans_serif_family(name);
    }
    Arc::new(fontdb)
}
