use bincode::{ErrorKind, deserialize, serialize};
use serde::{Serialize, de::DeserializeOwned};
use std::io::{self, Read, Write};

/// Cap on a single framed message, to keep a misbehaving peer from forcing
/// an unbounded allocation. Full snapshots are a few kilobytes.
const MAX_MESSAGE_SIZE: usize = 256 * 1024;

/// Read one length-prefixed, bincode-encoded message from a byte stream.
pub fn read_prefixed<T: DeserializeOwned, R: Read>(reader: &mut R) -> io::Result<T> {
    let mut len_bytes = [0; 4];
    reader.read_exact(&mut len_bytes)?;
    let len = u32::from_le_bytes(len_bytes) as usize;

    if len > MAX_MESSAGE_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("message size {len} exceeds the {MAX_MESSAGE_SIZE}-byte cap"),
        ));
    }

    let mut buf = vec![0; len];
    reader.read_exact(&mut buf)?;

    match deserialize(&buf) {
        Ok(value) => Ok(value),
        Err(error) => match *error {
            ErrorKind::Io(error) => Err(error),
            _ => Err(io::ErrorKind::InvalidData.into()),
        },
    }
}

/// Write one message as a little-endian length prefix followed by its
/// bincode encoding, in a single chunk so a reader never sees a prefix
/// without its payload.
pub fn write_prefixed<T: Serialize, W: Write>(writer: &mut W, value: &T) -> io::Result<()> {
    match serialize(&value) {
        Ok(serialized) => {
            if serialized.len() > MAX_MESSAGE_SIZE {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "serialized message size {} exceeds the {MAX_MESSAGE_SIZE}-byte cap",
                        serialized.len()
                    ),
                ));
            }
            let size = serialized.len() as u32;
            let mut buf = Vec::from(size.to_le_bytes());
            buf.extend(serialized);
            writer.write_all(&buf)?;
            Ok(())
        }
        Err(error) => match *error {
            ErrorKind::Io(error) => Err(error),
            _ => Err(io::ErrorKind::InvalidData.into()),
        },
    }
}
