//! Public search result pages, read into the same rows as the register files.

use crate::constants::*;
use crate::mapping::{RecordKind, Row};
use crate::normalize::Lang;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

const ABBREVIATION_CODE: &str = "002";
const COMMERCIAL_NAME_CODE: &str = "003";

/// What the public search page tells about an enterprise or an establishment unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CbePage {
    pub id: Option<String>,
    /// Enterprise of an establishment unit
    pub parent_id: Option<String>,
    pub names: Vec<(Option<Lang>, String)>,
    pub abbreviations: Vec<(Option<Lang>, String)>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub activities: Vec<String>,
}

fn own_text(cell: &ElementRef<'_>) -> String {
    cell.children()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(text.trim()),
            _ => None,
        })
        .find(|text| !text.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Register number of a cell, either as plain text or as a link
fn number(cell: &ElementRef<'_>) -> String {
    let own = own_text(cell);
    if own.is_empty() {
        cell.text().collect::<String>().trim().to_string()
    } else {
        own
    }
}

fn marker_lang(marker: &str) -> Option<Lang> {
    if marker.contains(MARKER_DUTCH) {
        Some(Lang::Nl)
    } else if marker.contains(MARKER_FRENCH) {
        Some(Lang::Fr)
    } else if marker.contains(MARKER_GERMAN) {
        Some(Lang::De)
    } else if marker.contains(MARKER_ENGLISH) {
        Some(Lang::En)
    } else {
        None
    }
}

/// Names are text lines, each followed by an element saying in which language it is.
/// Without any such marker the whole cell is one untagged name.
fn names(cell: &ElementRef<'_>) -> Vec<(Option<Lang>, String)> {
    let mut names = Vec::new();
    let mut pending: Option<String> = None;

    for node in cell.children() {
        match node.value() {
            Node::Text(text) if !text.trim().is_empty() => {
                pending = Some(text.trim().to_string());
            }
            Node::Element(_) => {
                let Some(element) = ElementRef::wrap(node) else {
                    continue;
                };
                let marker: String = element.text().collect();
                if let (Some(lang), Some(name)) = (marker_lang(&marker), pending.as_ref()) {
                    names.push((Some(lang), name.clone()));
                    pending = None;
                }
            }
            _ => {}
        }
    }

    if names.is_empty() {
        let whole = cell.text().collect::<String>().trim().to_string();
        if !whole.is_empty() {
            names.push((None, whole));
        }
    }
    names
}

fn link(cell: &ElementRef<'_>) -> Option<String> {
    cell.select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}

impl CbePage {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let mut page = CbePage::default();
        let mut enterprise_number = None;

        for row in document.select(&ROW) {
            let cells: Vec<ElementRef<'_>> = row.select(&CELL).collect();
            let Some(first) = cells.first() else {
                continue;
            };
            let label = first.text().collect::<String>();
            let label = label.trim();

            // Activity lines are a single cell: "BTW 2008 <a>62.010</a> - ..."
            if label.starts_with(LABEL_VAT_ACTIVITY) || label.starts_with(LABEL_NSSO_ACTIVITY) {
                if let Some(code) = first.select(&LINK).next() {
                    let code = code.text().collect::<String>().trim().replace('.', "");
                    if !code.is_empty() && !page.activities.contains(&code) {
                        page.activities.push(code);
                    }
                }
                continue;
            }

            let Some(value) = cells.get(1) else {
                continue;
            };
            match label {
                LABEL_ENTERPRISE_NUMBER => enterprise_number = Some(number(value)),
                LABEL_ESTABLISHMENT_NUMBER => page.id = Some(number(value)),
                LABEL_NAME => page.names = names(value),
                LABEL_ABBREVIATION => page.abbreviations = names(value),
                LABEL_EMAIL => {
                    page.email = link(value)
                        .map(|href| href.trim_start_matches("mailto:").to_string())
                }
                LABEL_WEBSITE => page.website = link(value),
                _ => {}
            }
        }

        match page.id {
            Some(_) => page.parent_id = enterprise_number,
            None => page.id = enterprise_number,
        }
        page.id = page.id.filter(|id| !id.is_empty());
        page
    }

    pub fn is_site(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Rows in the layout of the register files, ready for the record mappers
    pub fn to_rows(&self) -> Vec<(RecordKind, Row)> {
        let Some(id) = self.id.as_deref() else {
            return Vec::new();
        };
        let mut rows = Vec::new();

        let (name_type, entity_type) = match &self.parent_id {
            Some(parent) => {
                rows.push((RecordKind::Site, Row::from_fields([id, "", parent.as_str()])));
                (COMMERCIAL_NAME_CODE, "EST")
            }
            None => {
                rows.push((RecordKind::Organization, Row::from_fields([id, "", "", "", "", ""])));
                (LEGAL_NAME_CODE, "ENT")
            }
        };

        for (lang, name) in &self.names {
            let lang = lang.map(Lang::code).unwrap_or_default();
            rows.push((RecordKind::Name, Row::from_fields([id, lang, name_type, name.as_str()])));
        }
        for (lang, abbreviation) in &self.abbreviations {
            let lang = lang.map(Lang::code).unwrap_or_default();
            rows.push((
                RecordKind::Name,
                Row::from_fields([id, lang, ABBREVIATION_CODE, abbreviation.as_str()]),
            ));
        }
        if let Some(email) = &self.email {
            rows.push((RecordKind::Contact, Row::from_fields([id, entity_type, "EMAIL", email.as_str()])));
        }
        if let Some(website) = &self.website {
            rows.push((RecordKind::Contact, Row::from_fields([id, entity_type, "WEB", website.as_str()])));
        }
        for activity in &self.activities {
            rows.push((
                RecordKind::Activity,
                Row::from_fields([id, "", CURRENT_NACE_VERSION, activity.as_str(), ""]),
            ));
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTERPRISE_PAGE: &str = r##"<html><body><div id="table"><table>
<tr><td class="I" colspan="4"><h2>Algemeen</h2></td></tr>
<tr><td class="QL">Ondernemingsnummer:</td><td class="QL">0671.516.647 <a href="#">print</a></td></tr>
<tr><td class="RL">Naam:</td><td class="RL" colspan="3">Federale Overheidsdienst Beleid en Ondersteuning<br><span class="upd">Naam in het Nederlands, sinds 9 februari 2017</span><br>Service public fédéral Stratégie et Appui<br><span class="upd">Naam in het Frans, sinds 9 februari 2017</span><br></td></tr>
<tr><td class="QL">Afkorting:</td><td class="QL" colspan="3">FOD BOSA<br><span class="upd">Naam in het Nederlands, sinds 9 februari 2017</span><br></td></tr>
<tr><td class="RL">E-mail:</td><td class="RL"><a href="mailto:info@bosa.fgov.be">info@bosa.fgov.be</a></td></tr>
<tr><td class="QL">Webadres:</td><td class="QL"><a href="http://www.bosa.be">www.bosa.be</a></td></tr>
<tr><td class="QL" colspan="3">BTW 2008 <a class="nacelink" href="#">84.110</a> - Algemeen overheidsbestuur</td></tr>
<tr><td class="QL" colspan="3">RSZ 2008 <a class="nacelink" href="#">84.110</a> - Algemeen overheidsbestuur</td></tr>
<tr><td class="QL" colspan="3">RSZ 2008 <a class="nacelink" href="#">84.130</a> - Openbaar bestuur op economisch gebied</td></tr>
</table></div></body></html>"##;

    const SITE_PAGE: &str = r#"<html><body><table>
<tr><td>Vestigingseenheidsnummer:</td><td>2.147.812.701</td></tr>
<tr><td>Ondernemingsnummer:</td><td><a href="toonondernemingps.html?ondernemingsnummer=671516647">0671.516.647</a></td></tr>
<tr><td>Naam:</td><td>Zetel Brussel</td></tr>
</table></body></html>"#;

    #[test]
    fn test_enterprise_page() {
        let page = CbePage::parse(ENTERPRISE_PAGE);

        assert_eq!(page.id.as_deref(), Some("0671.516.647"));
        assert!(!page.is_site());
        assert_eq!(
            page.names,
            vec![
                (Some(Lang::Nl), "Federale Overheidsdienst Beleid en Ondersteuning".to_string()),
                (Some(Lang::Fr), "Service public fédéral Stratégie et Appui".to_string()),
            ]
        );
        assert_eq!(page.abbreviations, vec![(Some(Lang::Nl), "FOD BOSA".to_string())]);
        assert_eq!(page.email.as_deref(), Some("info@bosa.fgov.be"));
        assert_eq!(page.website.as_deref(), Some("http://www.bosa.be"));
        assert_eq!(page.activities, vec!["84110", "84130"]);
    }

    #[test]
    fn test_site_page() {
        let page = CbePage::parse(SITE_PAGE);

        assert_eq!(page.id.as_deref(), Some("2.147.812.701"));
        assert_eq!(page.parent_id.as_deref(), Some("0671.516.647"));
        assert!(page.is_site());
        assert_eq!(page.names, vec![(None, "Zetel Brussel".to_string())]);

        let rows = page.to_rows();
        assert_eq!(rows[0].0, RecordKind::Site);
        assert_eq!(rows[0].1.field(2), "0671.516.647");
        assert_eq!(rows[1].1.field(2), "003");
    }

    #[test]
    fn test_page_without_number() {
        let page = CbePage::parse("<html><body><p>Geen gegevens gevonden</p></body></html>");
        assert!(page.id.is_none());
        assert!(page.to_rows().is_empty());
    }

    #[test]
    fn test_rows_of_enterprise_page() {
        let rows = CbePage::parse(ENTERPRISE_PAGE).to_rows();
        let kinds: Vec<RecordKind> = rows.iter().map(|(kind, _)| *kind).collect();

        assert_eq!(
            kinds,
            vec![
                RecordKind::Organization,
                RecordKind::Name,
                RecordKind::Name,
                RecordKind::Name,
                RecordKind::Contact,
                RecordKind::Contact,
                RecordKind::Activity,
                RecordKind::Activity,
            ]
        );
        assert_eq!(rows[1].1.field(1), "2");
        assert_eq!(rows[1].1.field(2), LEGAL_NAME_CODE);
        assert_eq!(rows[3].1.field(2), "002");
        assert_eq!(rows[6].1.field(3), "84110");
    }
}
