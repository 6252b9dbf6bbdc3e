//! Fixed document header and footer.

use super::config::LatexConfig;

/// Everything up to and including `\begin{document}` and the font group.
pub fn preamble(config: &LatexConfig) -> String {
    let mut class_options = vec![config.font_size.clone()];
    class_options.extend(config.class_options.iter().cloned());

    let mut out = String::new();
    out.push_str(&format!(
        "\\documentclass[{}]{{book}}\n",
        class_options.join(",")
    ));
    out.push_str("\\usepackage{textcomp}\n");
    out.push_str(&format!(
        "\\usepackage[\n    colorlinks=true,\n    linkcolor={},\n    bookmarks=true,\n    \
         bookmarksnumbered=true,\n    hypertexnames=false,\n    plainpages=false,\n    \
         pdfpagelabels,\n    unicode=true\n]{{hyperref}}\n",
        config.link_color
    ));
    out.push_str(&format!(
        "\\usepackage[\n    papersize={{{},{}}},\n    margin={},\n    ignoreall,\n    pdftex\n]{{geometry}}\n",
        config.paper_width, config.paper_height, config.margin
    ));
    for package in ["graphicx", "url", "epigraph", "verse", "verbatim", "ulem"] {
        out.push_str(&format!("\\usepackage{{{package}}}\n"));
    }
    out.push_str(&format!(
        "\\usepackage[{}]{{inputenc}}\n",
        config.input_encoding
    ));
    out.push_str(&format!("\\usepackage[{}]{{babel}}\n", config.language));
    out.push_str("\\setcounter{secnumdepth}{-2}\n");

    out.push_str("\n\\begin{document}\n\n");
    if let Some(family) = &config.font_family {
        out.push_str(&format!("{{\\fontfamily{{{family}}}\\selectfont\n"));
    }
    out
}

/// Closes the font group and the document.
pub fn postamble(config: &LatexConfig) -> String {
    let mut out = String::new();
    if config.font_family.is_some() {
        out.push('}');
    }
    out.push_str("\n\\end{document}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preamble() {
        let tex = preamble(&LatexConfig::default());
        assert!(tex.starts_with("\\documentclass[12pt,openany]{book}\n"));
        assert!(tex.contains("papersize={90.6mm,122.4mm}"));
        assert!(tex.contains("margin=1mm"));
        assert!(tex.contains("linkcolor=black"));
        assert!(tex.contains("\\usepackage{epigraph}\n"));
        assert!(tex.contains("\\usepackage[utf8]{inputenc}\n"));
        assert!(tex.contains("\\usepackage[russian]{babel}\n"));
        assert!(tex.ends_with("\\begin{document}\n\n{\\fontfamily{cmss}\\selectfont\n"));
    }

    #[test]
    fn test_without_font_family() {
        let config = LatexConfig::default().with_font_family(None);
        assert!(preamble(&config).ends_with("\\begin{document}\n\n"));
        assert_eq!(postamble(&config), "\n\\end{document}\n");
        assert_eq!(postamble(&LatexConfig::default()), "}\n\\end{document}\n");
    }

    #[test]
    fn test_custom_geometry_and_language() {
        let config = LatexConfig::default()
            .with_paper_size("a5", "b5")
            .with_margin("5mm")
            .with_language("english");
        let tex = preamble(&config);
        assert!(tex.contains("papersize={a5,b5}"));
        assert!(tex.contains("margin=5mm"));
        assert!(tex.contains("\\usepackage[english]{babel}\n"));
    }
}
