use std::{
    fmt,
    fs::File,
    io::{self, Read, Seek, SeekFrom},
    path::{Path, PathBuf},
};

use log::{info, warn};

#[derive(Debug)]
pub enum DiskError {
    Io(io::Error),
}

impl fmt::Display for DiskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiskError::Io(e) => write!(f, "backing store I/O error: {}", e),
        }
    }
}

impl std::error::Error for DiskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiskError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for DiskError {
    fn from(e: io::Error) -> Self {
        DiskError::Io(e)
    }
}

/// Read-only backing store. The file is split into `BLOCKSIZE` byte blocks,
/// block `n` starting at byte `n * BLOCKSIZE`.
#[derive(Debug)]
pub struct Disk<const BLOCKSIZE: usize> {
    path: PathBuf,
    file: File,
    len: u64,
}

impl<const BLOCKSIZE: usize> Disk<BLOCKSIZE> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DiskError> {
        assert!(BLOCKSIZE > 0, "BlockSize must not be zero");
        let path = path.as_ref().to_path_buf();
        let file = File::options().read(true).open(&path)?;
        let len = file.metadata()?.len();
        info!("Opened backing store {} ({} bytes)", path.display(), len);
        Ok(Self { path, file, len })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of blocks in the file, counting a trailing partial block.
    pub fn block_count(&self) -> usize {
        let blocksize = BLOCKSIZE as u64;
        ((self.len + blocksize - 1) / blocksize) as usize
    }

    /// Reads block `block_number`. Bytes beyond the end of the file are
    /// returned as zeros.
    pub fn read_block(&self, block_number: usize) -> Result<Box<[u8; BLOCKSIZE]>, DiskError> {
        info!("Start reading block[{}]", block_number);
        let mut file = &self.file;
        file.seek(SeekFrom::Start((block_number * BLOCKSIZE) as u64))?;

        let mut buf = Box::new([0; BLOCKSIZE]);
        let mut filled = 0;
        while filled < BLOCKSIZE {
            match file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        if filled < BLOCKSIZE {
            warn!(
                "Block[{}] is short ({} of {} bytes), zero-padding",
                block_number, filled, BLOCKSIZE
            );
        }
        info!("Done reading block[{}]", block_number);
        Ok(buf)
    }
}
