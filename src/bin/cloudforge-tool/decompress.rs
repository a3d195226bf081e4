use std::io;
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;

/// `res/` packed by the build script: templates, sample content and public files.
const RESOURCES: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/res.tar.gz"));

pub fn decompress_files(output: &Path) -> io::Result<()> {
    let tar = GzDecoder::new(RESOURCES);
    let mut archive = Archive::new(tar);
    archive.unpack(output)?;

    Ok(())
}
