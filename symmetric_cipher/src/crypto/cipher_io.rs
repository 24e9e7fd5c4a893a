use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Читает до `chunk_size` байт; меньше возвращается только в конце потока.
pub(crate) async fn read_chunk<R>(reader: &mut R, chunk_size: usize) -> io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::with_capacity(chunk_size);
    reader.take(chunk_size as u64).read_to_end(&mut buffer).await?;
    Ok(buffer)
}

/// Размер порции файла, кратный размеру блока (около 1 МБ).
#[inline]
pub(crate) fn aligned_chunk_size(block_size: usize, target: usize) -> usize {
    (target / block_size).max(1) * block_size
}

pub(crate) fn join_error(err: tokio::task::JoinError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

/// Временный файл рядом с `output`: `<имя>.part`.
pub(crate) fn partial_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".part");
    output.with_file_name(name)
}

/// Успех: временный файл переименовывается в `output`.
/// Ошибка: временный файл удаляется, `output` не трогается.
pub(crate) async fn finish_output<T, E>(
    result: Result<T, E>,
    partial: &Path,
    output: &Path,
) -> Result<T, E>
where
    E: From<io::Error>,
{
    match result {
        Ok(value) => {
            tokio::fs::rename(partial, output).await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(cleanup) = tokio::fs::remove_file(partial).await {
                log::debug!("{}: {cleanup}", partial.display());
            }
            Err(err)
        }
    }
}
