use std::os::raw::c_char;

use densenl::Error;

/// Copy `string` to the C buffer `buffer` with space for `bufflen`
/// characters, including the final NULL.
pub unsafe fn copy_str_to_c(string: &str, buffer: *mut c_char, bufflen: usize) -> Result<(), Error> {
    if bufflen == 0 {
        return Ok(());
    }

    if string.len() >= bufflen {
        return Err(Error::InvalidParameter(format!(
            "the buffer is too small for this string: need {} bytes, got {}",
            string.len() + 1, bufflen
        )));
    }

    std::ptr::copy(string.as_ptr(), buffer.cast(), string.len());
    // NULL-terminate the string
    buffer.add(string.len()).write(0);

    return Ok(());
}
