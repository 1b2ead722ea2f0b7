use std::io::{self, BufRead, Write};

/// Copies `reader` to `writer` one line at a time and returns the line count.
///
/// Lines are copied as raw bytes, terminators included, so the output matches
/// the input exactly even for non-UTF-8 text or a missing final newline.
pub fn copy_lines<R, W>(mut reader: R, mut writer: W) -> io::Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut line = Vec::new();
    let mut count = 0;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        writer.write_all(&line)?;
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn copy(input: &[u8]) -> (Vec<u8>, usize) {
        let mut out = Vec::new();
        let n = copy_lines(Cursor::new(input), &mut out).unwrap();
        (out, n)
    }

    #[test]
    fn copies_lines_verbatim() {
        let (out, n) = copy(b"first\nsecond\n");
        assert_eq!(out, b"first\nsecond\n");
        assert_eq!(n, 2);
    }

    #[test]
    fn keeps_last_line_without_newline() {
        let (out, n) = copy(b"a\nb");
        assert_eq!(out, b"a\nb");
        assert_eq!(n, 2);
    }

    #[test]
    fn empty_input_has_no_lines() {
        let (out, n) = copy(b"");
        assert!(out.is_empty());
        assert_eq!(n, 0);
    }

    #[test]
    fn blank_lines_and_crlf_are_preserved() {
        let (out, n) = copy(b"x\r\n\r\n\ny\n");
        assert_eq!(out, b"x\r\n\r\n\ny\n");
        assert_eq!(n, 4);
    }

    #[test]
    fn non_utf8_bytes_pass_through() {
        let (out, _) = copy(&[0xff, 0xfe, b'\n']);
        assert_eq!(out, [0xff, 0xfe, b'\n']);
    }
}
