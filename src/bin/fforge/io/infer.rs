use std::path::Path;

use fermi_forge::io::Format;

pub fn molecule_format(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "json" => Some(Format::Json),
        "xyz" => Some(Format::Xyz),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_map_case_insensitively() {
        assert_eq!(molecule_format(Path::new("h2.JSON")), Some(Format::Json));
        assert_eq!(molecule_format(Path::new("out/ring.xyz")), Some(Format::Xyz));
        assert_eq!(molecule_format(Path::new("H2_sto-3g_singlet_0.7414")), None);
        assert_eq!(molecule_format(Path::new("ring.txt")), None);
    }
}
