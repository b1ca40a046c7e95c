//! Closing markup.

use std::fmt::{self, Write};

/// Close the table, the body and the document.
pub fn output_footer<W: Write>(out: &mut W) -> fmt::Result {
    writeln!(out, "</table>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_markup() {
        let mut out = String::new();
        output_footer(&mut out).unwrap();
        assert_eq!(out, "</table>\n</body>\n</html>\n");
    }

    #[test]
    fn test_footer_appends() {
        let mut out = String::from("<tr>\n</tr>\n");
        output_footer(&mut out).unwrap();
        assert!(out.starts_with("<tr>\n</tr>\n</table>"));
    }
}
