// HTML 表格提取
// 只处理本项目数据源用到的结构：<table> 内的 <tr>/<th>/<td>，不支持嵌套表格和 colspan。
// 标签名大小写不敏感。注释、<script> 和 <style> 在扫描前整体去掉。

use crate::models::table::CanonicalTable;

/// Parses every `<table>` in the document, in document order.
///
/// The header is the first row made only of `<th>` cells (the first row when
/// there is none); every later row with at least one cell is a data row.
pub fn parse_tables(html: &str) -> Vec<CanonicalTable> {
    let cleaned = strip_non_content(html);
    let html = cleaned.as_str();
    // ASCII 小写不改变字节偏移，lc 与 html 的下标可以互用
    let lc = to_lowercase_fast(html);
    let mut tables = Vec::new();
    let mut from = 0;

    while let Some(start) = find_open_tag(&lc, "table", from) {
        let end = lc[start..]
            .find("</table")
            .map(|rel| start + rel)
            .unwrap_or(lc.len());

        if let Some(table) = parse_table(&html[start..end], &lc[start..end]) {
            tables.push(table);
        }
        from = end;
        if from >= lc.len() {
            break;
        }
        from += 1;
    }

    tables
}

struct Cell {
    header: bool,
    text: String,
}

fn parse_table(html: &str, lc: &str) -> Option<CanonicalTable> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut pos = 0;

    while let Some(start) = find_open_tag(lc, "tr", pos) {
        let body_start = start + 3;
        // </tr> 可以省略，下一行开始即本行结束
        let end = [lc[body_start..].find("</tr").map(|r| body_start + r), find_open_tag(lc, "tr", body_start)]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(lc.len());

        let cells = parse_cells(&html[start..end], &lc[start..end]);
        if !cells.is_empty() {
            rows.push(cells);
        }
        pos = end;
    }

    if rows.is_empty() {
        return None;
    }

    let header_idx = rows
        .iter()
        .position(|row| row.iter().all(|c| c.header))
        .unwrap_or(0);

    let mut rows = rows.into_iter().skip(header_idx);
    let columns: Vec<String> = rows.next()?.into_iter().map(|c| c.text).collect();
    let data = rows
        .map(|row| row.into_iter().map(|c| c.text).collect())
        .collect();

    Some(CanonicalTable::new(columns, data))
}

fn parse_cells(html: &str, lc: &str) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut pos = 0;

    loop {
        let (start, header) = match (find_open_tag(lc, "td", pos), find_open_tag(lc, "th", pos)) {
            (Some(td), Some(th)) if th < td => (th, true),
            (Some(td), _) => (td, false),
            (None, Some(th)) => (th, true),
            (None, None) => break,
        };

        let open_end = match lc[start..].find('>') {
            Some(rel) => start + rel + 1,
            None => break,
        };

        let close = if header { "</th" } else { "</td" };
        let end = [
            lc[open_end..].find(close).map(|r| open_end + r),
            find_open_tag(lc, "td", open_end),
            find_open_tag(lc, "th", open_end),
        ]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(lc.len());

        cells.push(Cell {
            header,
            text: cell_text(&html[open_end..end]),
        });
        pos = end;
    }

    cells
}

/// Removes `<!-- ... -->` comments and `<script>`/`<style>` elements with their content.
/// An unterminated block runs to the end of the document.
pub fn strip_non_content(html: &str) -> String {
    let lc = to_lowercase_fast(html);
    let mut out = String::with_capacity(html.len());
    let mut pos = 0;

    loop {
        let next = [
            lc[pos..].find("<!--").map(|r| (pos + r, "-->")),
            find_open_tag(&lc, "script", pos).map(|start| (start, "</script")),
            find_open_tag(&lc, "style", pos).map(|start| (start, "</style")),
        ]
        .into_iter()
        .flatten()
        .min_by_key(|(start, _)| *start);

        let (start, close) = match next {
            Some(found) => found,
            None => break,
        };
        out.push_str(&html[pos..start]);

        // 结束标记从开始标记之后找，"<!-->" 不算闭合
        let body_start = if close == "-->" { start + 4 } else { start + 1 };
        pos = match lc[body_start..].find(close) {
            Some(rel) => {
                let close_end = body_start + rel + close.len();
                if close == "-->" {
                    close_end
                } else {
                    lc[close_end..].find('>').map(|r| close_end + r + 1).unwrap_or(lc.len())
                }
            }
            None => lc.len(),
        };
    }

    out.push_str(&html[pos..]);
    out
}

/// Finds `<tag` followed by whitespace, `>` or `/`, so `<th` never matches `<thead`.
fn find_open_tag(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let pat = format!("<{}", tag);
    let bytes = lc.as_bytes();
    let mut pos = from;

    while let Some(rel) = lc.get(pos..)?.find(&pat) {
        let start = pos + rel;
        let after = start + pat.len();
        match bytes.get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(start),
            Some(_) => pos = after,
            None => return None,
        }
    }
    None
}

fn cell_text(inner: &str) -> String {
    normalize_ws(&decode_entities(&strip_tags(inner)))
}

/// Remove all HTML tags `<...>` from the string.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Decodes the named entities seen in table cells plus numeric `&#NN;` / `&#xHH;`.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').filter(|&semi| semi <= 10).and_then(|semi| {
            let entity = &tail[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "nbsp" => Some(' '),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" | "#39" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse::<u32>().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi))
        });

        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Collapse sequences of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fast ASCII-only lowercasing for tag matching.
fn to_lowercase_fast(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIKI_SNIPPET: &str = r#"
<html><body>
<table class="wikitable sortable" id="constituents">
<tbody><tr>
<th>Symbol</th>
<th>Security</th>
<th>GICS Sector</th>
</tr>
<tr>
<td><a rel="nofollow" class="external text" href="https://www.nyse.com/quote/XNYS:MMM">MMM</a></td>
<td><a href="/wiki/3M" title="3M">3M</a></td>
<td>Industrials</td>
</tr>
<tr>
<td><a href="https://www.nasdaq.com/market-activity/stocks/aapl">AAPL</a></td>
<td><a href="/wiki/Apple_Inc." title="Apple Inc.">Apple Inc.</a></td>
<td>Information&#160;Technology</td>
</tr>
<tr>
<td>AT&amp;T</td>
<TD>AT&amp;T Inc.</TD>
<td>Communication   Services</td>
</tr>
</tbody></table>
<TABLE class="wikitable"><tr><th>Date</th><th>Added</th></tr><tr><td>2024-01-01</td><td>XYZ</td></tr></TABLE>
</body></html>
"#;

    #[test]
    fn test_parse_wiki_tables() {
        let tables = parse_tables(WIKI_SNIPPET);
        assert_eq!(tables.len(), 2);

        let first = &tables[0];
        assert_eq!(first.columns(), &["Symbol", "Security", "GICS Sector"]);
        assert_eq!(first.column("Symbol").unwrap(), vec!["MMM", "AAPL", "AT&T"]);
        assert_eq!(first.get(1, "GICS Sector"), Some("Information Technology"));
        assert_eq!(first.get(2, "GICS Sector"), Some("Communication Services"));

        assert_eq!(tables[1].column("Added").unwrap(), vec!["XYZ"]);
    }

    #[test]
    fn test_thead_and_omitted_row_close() {
        let html = "<table><thead><tr><th>A<th>B</thead><tbody><tr><td>1<td>2<tr><td>3<td>4</tbody></table>";
        let tables = parse_tables(html);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].columns(), &["A", "B"]);
        assert_eq!(tables[0].rows(), &[vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_first_row_is_header_without_th() {
        let html = "<table><tr><td>x</td><td>y</td></tr><tr><td>1</td></tr></table>";
        let tables = parse_tables(html);
        assert_eq!(tables[0].columns(), &["x", "y"]);
        assert_eq!(tables[0].rows(), &[vec!["1", ""]]);
    }

    #[test]
    fn test_no_tables() {
        assert!(parse_tables("<html><body><p>no data</p></body></html>").is_empty());
        assert!(parse_tables("<table></table>").is_empty());
        assert!(parse_tables("<tablet>nope</tablet>").is_empty());
    }

    #[test]
    fn test_comments_are_not_cells() {
        let html = "<table><tr><th>A</th><th>B</th><th>C</th></tr>\
                    <!-- <tr><td>hidden</td></tr> -->\
                    <tr><td>a</td><td>b<!-- <td>c</td> --></td></tr></table>";
        let tables = parse_tables(html);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows(), &[vec!["a", "b", ""]]);
    }

    #[test]
    fn test_style_and_script_text_dropped() {
        let html = "<table><tr><th>Symbol</th><th>Security</th></tr>\
                    <tr><td>A<style>.x{}</style></td><td><SCRIPT type=\"text/javascript\">var t = \"<td>\";</SCRIPT>Agilent</td></tr>\
                    </table>";
        let tables = parse_tables(html);
        assert_eq!(tables[0].rows(), &[vec!["A", "Agilent"]]);
    }

    #[test]
    fn test_strip_non_content() {
        assert_eq!(strip_non_content("a<!-- x -->b"), "ab");
        assert_eq!(strip_non_content("a<style>p{}</style >b<script>1</script>c"), "abc");
        assert_eq!(strip_non_content("Código<!-- não -->;"), "Código;");
        assert_eq!(strip_non_content("keep<!-- open"), "keep");
        // <scripts> 不是 <script>
        assert_eq!(strip_non_content("<scripts>x</scripts>"), "<scripts>x</scripts>");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("A&amp;B &lt;c&gt; &#65;&#x42;"), "A&B <c> AB");
        assert_eq!(decode_entities("R&D & co"), "R&D & co");
        assert_eq!(decode_entities("&nbsp;x"), " x");
    }
}
