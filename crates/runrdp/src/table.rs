/// One line of the `hosts` listing.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HostRow {
    pub name: String,
    pub kind: String,
    pub address: String,
    pub cred: String,
    pub proxy: String,
    pub tunnel: String,
    pub document: String,
}

pub struct TableFormatter {
    name_width: usize,
    kind_width: usize,
    address_width: usize,
    cred_width: usize,
    proxy_width: usize,
    tunnel_width: usize,
    document_width: usize,
}

fn column_width(rows: &[HostRow], header: &str, max: usize, value: fn(&HostRow) -> &str) -> usize {
    rows.iter()
        .map(|row| value(row).chars().count())
        .max()
        .unwrap_or(0)
        .clamp(header.chars().count(), max)
}

impl TableFormatter {
    pub fn new(rows: &[HostRow]) -> Self {
        Self {
            name_width: column_width(rows, "Name", 40, |r| r.name.as_str()),
            kind_width: column_width(rows, "Kind", 10, |r| r.kind.as_str()),
            address_width: column_width(rows, "Address", 39, |r| r.address.as_str()),
            cred_width: column_width(rows, "Cred", 24, |r| r.cred.as_str()),
            proxy_width: column_width(rows, "Proxy", 24, |r| r.proxy.as_str()),
            tunnel_width: column_width(rows, "Tunnel", 24, |r| r.tunnel.as_str()),
            document_width: column_width(rows, "Document", 30, |r| r.document.as_str()),
        }
    }

    fn widths(&self) -> [usize; 7] {
        [
            self.name_width,
            self.kind_width,
            self.address_width,
            self.cred_width,
            self.proxy_width,
            self.tunnel_width,
            self.document_width,
        ]
    }

    pub fn print_table(&self, rows: &[HostRow]) {
        println!("{}", self.border('┌', '┬', '┐'));
        println!(
            "{}",
            self.line(["Name", "Kind", "Address", "Cred", "Proxy", "Tunnel", "Document"])
        );
        println!("{}", self.border('├', '┼', '┤'));
        for row in rows {
            println!(
                "{}",
                self.line([
                    row.name.as_str(),
                    row.kind.as_str(),
                    row.address.as_str(),
                    row.cred.as_str(),
                    row.proxy.as_str(),
                    row.tunnel.as_str(),
                    row.document.as_str(),
                ])
            );
        }
        println!("{}", self.border('└', '┴', '┘'));
    }

    fn line(&self, cells: [&str; 7]) -> String {
        let body: Vec<String> = cells
            .iter()
            .zip(self.widths())
            .map(|(cell, width)| truncate(cell, width))
            .collect();
        format!("│ {} │", body.join(" │ "))
    }

    fn border(&self, left: char, middle: char, right: char) -> String {
        let segments: Vec<String> = self
            .widths()
            .iter()
            .map(|width| "─".repeat(width + 2))
            .collect();
        format!("{left}{}{right}", segments.join(middle.to_string().as_str()))
    }
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Counts characters rather than bytes so multi-byte names stay intact.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str) -> HostRow {
        HostRow {
            name: name.to_string(),
            kind: "basic".to_string(),
            address: "10.0.0.1".to_string(),
            cred: String::new(),
            proxy: String::new(),
            tunnel: String::new(),
            document: "work.toml".to_string(),
        }
    }

    #[test]
    fn test_truncate_pads_short_values() {
        assert_eq!(truncate("web", 6), "web   ");
    }

    #[test]
    fn test_truncate_long_values() {
        assert_eq!(truncate("production-web", 8), "produ...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("héllo-wörld", 8), "héllo...");
    }

    #[test]
    fn test_widths_fit_header_and_rows() {
        let formatter = TableFormatter::new(&[row("a"), row("database-primary")]);
        assert_eq!(formatter.name_width, "database-primary".len());
        assert_eq!(formatter.kind_width, "basic".len());
        assert_eq!(formatter.cred_width, "Cred".len());
    }

    #[test]
    fn test_line_and_border_align() {
        let formatter = TableFormatter::new(&[row("web")]);
        let border = formatter.border('┌', '┬', '┐');
        let line = formatter.line(["web", "basic", "10.0.0.1", "", "", "", "work.toml"]);
        assert_eq!(border.chars().count(), line.chars().count());
    }
}
