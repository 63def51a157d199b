//! Tarball extraction
//!
//! Sysroot images are gzip-compressed tarballs. Like `tar xf`, the
//! compression is detected from the file contents rather than the name,
//! so an uncompressed tarball unpacks too.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;

use crate::error::ArchiveError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Whether the file starts with the gzip magic bytes
fn is_gzip(file: &mut File) -> std::io::Result<bool> {
    let mut magic = [0u8; 2];
    let gzip = match file.read_exact(&mut magic) {
        Ok(()) => magic == GZIP_MAGIC,
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => false,
        Err(e) => return Err(e),
    };
    file.seek(SeekFrom::Start(0))?;
    Ok(gzip)
}

fn unpack<R: Read>(reader: R, archive_path: &Path, dest_dir: &Path) -> Result<(), ArchiveError> {
    let mut archive = Archive::new(reader);
    archive.set_preserve_permissions(true);
    archive.set_preserve_mtime(true);
    archive.set_overwrite(true);

    // `unpack` refuses entries that would escape `dest_dir`
    archive.unpack(dest_dir).map_err(|e| ArchiveError::Unpack {
        path: archive_path.to_path_buf(),
        dest: dest_dir.to_path_buf(),
        error: e.to_string(),
    })
}

/// Extract a (optionally gzip-compressed) tarball into `dest_dir`
///
/// `dest_dir` must already exist.
pub fn extract_tarball(archive_path: &Path, dest_dir: &Path) -> Result<(), ArchiveError> {
    let open_error = |e: std::io::Error| ArchiveError::Open {
        path: archive_path.to_path_buf(),
        error: e.to_string(),
    };

    let mut file = File::open(archive_path).map_err(open_error)?;
    let gzip = is_gzip(&mut file).map_err(open_error)?;
    let reader = BufReader::new(file);

    tracing::debug!(
        "Extracting {} into {} (gzip: {gzip})",
        archive_path.display(),
        dest_dir.display()
    );

    if gzip {
        unpack(GzDecoder::new(reader), archive_path, dest_dir)
    } else {
        unpack(reader, archive_path, dest_dir)
    }
}
