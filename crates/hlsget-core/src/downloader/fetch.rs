//! One blocking segment fetch: HTTP GET with a browser-like User-Agent,
//! body streamed to the destination file.

use super::error::FetchError;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Downloads `url` into `dest`, creating or truncating the file. On any
/// failure the partial file is removed, so a failed task leaves no output
/// behind. Returns the number of bytes written.
pub fn fetch_to_file(url: &str, user_agent: &str, dest: &Path) -> Result<u64, FetchError> {
    match transfer(url, user_agent, dest) {
        Ok(written) => Ok(written),
        Err(e) => {
            let _ = fs::remove_file(dest);
            Err(e)
        }
    }
}

fn transfer(url: &str, user_agent: &str, dest: &Path) -> Result<u64, FetchError> {
    let mut file = File::create(dest)?;
    let mut written: u64 = 0;
    let mut disk_error: Option<std::io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.useragent(user_agent)?;
    easy.follow_location(true)?;

    let perform_result = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                disk_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };
    if let Err(e) = perform_result {
        if e.is_write_error() {
            if let Some(io_err) = disk_error.take() {
                return Err(FetchError::Io(io_err));
            }
        }
        return Err(FetchError::Curl(e));
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    file.flush()?;
    Ok(written)
}
