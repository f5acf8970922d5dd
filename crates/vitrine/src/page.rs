//! The portfolio page itself.
//!
//! [`portfolio_document`] describes everything on the page that the renderer can change: the slots of the dynamic
//! sections and the elements tagged for translation, with their French text. [`render_page`] turns that document into
//! the final HTML.
//!
//! Every language gets its own copy of the page, named by [`page_file`], and the language selector links them.
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::{
    GENERATOR,
    contact::SubmissionReceipt,
    cv::CvDocument,
    session::Labels,
    view::{Document, Slot, TaggedElement},
};

/// Names shown in the language selector. Other codes are shown uppercased.
const LANGUAGE_NAMES: &[(&str, &str)] = &[("fr", "Français"), ("en", "English")];

/// Opens the language menu and fakes the contact form submission, reading its texts from the form's data attributes.
const PAGE_SCRIPT: &str = r#"
document.getElementById('langBtn').addEventListener('click', function () {
  document.getElementById('langDropdown').classList.toggle('active');
});
document.getElementById('contactForm').addEventListener('submit', function (event) {
  event.preventDefault();
  var form = event.currentTarget;
  var button = form.querySelector('button[type="submit"]');
  var original = button.innerHTML;
  button.textContent = form.dataset.sentLabel;
  button.disabled = true;
  setTimeout(function () {
    form.reset();
    button.innerHTML = original;
    button.disabled = false;
  }, Number(form.dataset.resetAfter));
});
"#;

/// Tagged elements of the page: key path, leading icon, French text.
const TAGGED_ELEMENTS: &[(&str, Option<&str>, &str)] = &[
    ("nav.home", None, "Accueil"),
    ("nav.about", None, "À propos"),
    ("nav.skills", None, "Compétences"),
    ("nav.projects", None, "Projets"),
    ("nav.articles", None, "Articles"),
    ("nav.cv", None, "CV"),
    ("nav.contact", None, "Contact"),
    ("hero.greeting", None, "Bonjour, je suis"),
    ("hero.subtitle", None, "Développeur Rust & blockchain"),
    ("hero.cta", Some("fas fa-arrow-down"), "Voir mes projets"),
    ("about.title", None, "À propos"),
    (
        "about.text",
        None,
        "Passionné par les systèmes décentralisés, je conçois des outils fiables et performants.",
    ),
    ("about.profilePlaceholder", None, "Photo de profil"),
    ("skills.title", None, "Compétences"),
    ("skills.languages", Some("fas fa-code"), "Langages"),
    ("skills.blockchain", Some("fas fa-link"), "Blockchain"),
    ("skills.tools", Some("fas fa-tools"), "Outils"),
    ("projects.title", None, "Projets"),
    ("articles.title", None, "Articles"),
    ("cv.title", None, "Curriculum Vitae"),
    ("cv.download", Some("fas fa-download"), "Télécharger le CV"),
    ("contact.title", None, "Contact"),
    ("contact.name", None, "Nom"),
    ("contact.email", None, "Email"),
    ("contact.subject", None, "Sujet"),
    ("contact.message", None, "Message"),
    ("contact.send", Some("fas fa-paper-plane"), "Envoyer"),
    ("footer.rights", None, "Tous droits réservés."),
];

pub struct SkillGroup {
    pub key: &'static str,
    pub items: Vec<String>,
}

pub struct PageOptions {
    pub author: String,
    pub title: String,
    /// Path of the profile picture, relative to the site root.
    pub profile_image: String,
    /// Whether the profile picture exists. When it doesn't, the placeholder is shown from the start.
    pub profile_image_available: bool,
    pub cv: CvDocument,
    pub skills: Vec<SkillGroup>,
    /// Language code and its name in that language, in the order of the selector.
    pub languages: Vec<(String, String)>,
}

impl PageOptions {
    /// Offers exactly `codes` in the language selector.
    pub fn with_languages(mut self, codes: &[String]) -> Self {
        self.languages = codes
            .iter()
            .map(|code| {
                let name = LANGUAGE_NAMES
                    .iter()
                    .find(|(known, _)| known == code)
                    .map_or_else(|| code.to_uppercase(), |(_, name)| name.to_string());
                (code.clone(), name)
            })
            .collect();
        self
    }
}

/// File name of the page rendered in `code`, relative to the site root.
pub fn page_file(code: &str) -> String {
    format!("index.{code}.html")
}

impl Default for PageOptions {
    fn default() -> Self {
        let skills = |items: &[&str]| -> Vec<String> { items.iter().map(|item| item.to_string()).collect() };

        Self {
            author: "Olivier".into(),
            title: "Portfolio".into(),
            profile_image: "assets/images/profile.jpg".into(),
            profile_image_available: true,
            cv: CvDocument::default(),
            skills: vec![
                SkillGroup {
                    key: "skills.languages",
                    items: skills(&["Rust", "Go", "TypeScript"]),
                },
                SkillGroup {
                    key: "skills.blockchain",
                    items: skills(&["Cardano", "Plutus", "Aiken"]),
                },
                SkillGroup {
                    key: "skills.tools",
                    items: skills(&["Git", "Docker", "Linux"]),
                },
            ],
            languages: vec![
                ("fr".into(), "Français".into()),
                ("en".into(), "English".into()),
            ],
        }
    }
}

/// The page as first served: French text, loading messages in the dynamic sections.
pub fn portfolio_document(language: &str) -> Document {
    let document = Document::new(language)
        .with_slot(
            Slot::Projects,
            html! { p.loading { "Chargement des projets..." } }.into_string(),
        )
        .with_slot(
            Slot::Articles,
            html! { p.loading { "Chargement des articles..." } }.into_string(),
        )
        .with_slot(Slot::LanguageIndicator, language.to_uppercase());

    TAGGED_ELEMENTS
        .iter()
        .fold(document, |document, (key, icon, text)| {
            let element = TaggedElement::new(*key, *text);
            document.with_element(match icon {
                Some(icon) => element.with_icon(*icon),
                None => element,
            })
        })
}

/// Content of a tagged element: its icon, if any, then its text.
fn tagged(document: &Document, key: &str) -> Markup {
    match document.element(key) {
        Some(element) => html! {
            @if let Some(icon) = &element.icon {
                i class=(icon) {}
                " "
            }
            (element.text)
        },
        None => html! {},
    }
}

fn slot(document: &Document, slot: Slot) -> Markup {
    PreEscaped(document.slot(slot).unwrap_or_default().to_string())
}

pub fn render_page(document: &Document, labels: &Labels, options: &PageOptions) -> Markup {
    let cv_url = options.cv.encoded_url();
    let receipt = SubmissionReceipt::new(labels);

    html! {
        (DOCTYPE)
        html #htmlLang lang=(document.language()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="generator" content=(GENERATOR);
                title { (options.title) " - " (options.author) }
                link rel="stylesheet" href="css/style.css";
                link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";
            }
            body {
                nav #navbar.navbar {
                    div.nav-container {
                        a.nav-logo href="#home" { (options.author) }
                        ul #navMenu.nav-menu {
                            @for (anchor, key) in [
                                ("home", "nav.home"),
                                ("about", "nav.about"),
                                ("skills", "nav.skills"),
                                ("projects", "nav.projects"),
                                ("articles", "nav.articles"),
                                ("cv", "nav.cv"),
                                ("contact", "nav.contact"),
                            ] {
                                li { a.nav-link href={ "#" (anchor) } data-i18n=(key) { (tagged(document, key)) } }
                            }
                        }
                        div.lang-selector {
                            button #langBtn.lang-btn type="button" {
                                i.fas.fa-globe {}
                                " "
                                span id=(Slot::LanguageIndicator.id()) { (slot(document, Slot::LanguageIndicator)) }
                            }
                            div #langDropdown.lang-dropdown {
                                @for (code, name) in &options.languages {
                                    a.lang-option.active[code == document.language()] href=(page_file(code)) hreflang=(code) data-lang=(code) { (name) }
                                }
                            }
                        }
                        div #hamburger.hamburger { span {} span {} span {} }
                    }
                }

                section #home.hero {
                    div.hero-content {
                        p.hero-greeting data-i18n="hero.greeting" { (tagged(document, "hero.greeting")) }
                        h1.hero-name { (options.author) }
                        p.hero-subtitle data-i18n="hero.subtitle" { (tagged(document, "hero.subtitle")) }
                        a.btn.btn-primary href="#projects" data-i18n="hero.cta" { (tagged(document, "hero.cta")) }
                    }
                }

                section #about.section {
                    h2.section-title data-i18n="about.title" { (tagged(document, "about.title")) }
                    div.about-content {
                        div.about-image {
                            @let image_display = if options.profile_image_available { "display: block;" } else { "display: none;" };
                            @let placeholder_display = if options.profile_image_available { "display: none;" } else { "display: flex;" };
                            img #profileImage src=(options.profile_image) alt=(options.author) style=(image_display)
                                onerror="this.style.display='none'; document.getElementById('profilePlaceholder').style.display='flex';";
                            div #profilePlaceholder.profile-placeholder style=(placeholder_display) {
                                i.fas.fa-user {}
                                span data-i18n="about.profilePlaceholder" { (tagged(document, "about.profilePlaceholder")) }
                            }
                        }
                        p.about-text data-i18n="about.text" { (tagged(document, "about.text")) }
                    }
                }

                section #skills.section {
                    h2.section-title data-i18n="skills.title" { (tagged(document, "skills.title")) }
                    div.skills-grid {
                        @for group in &options.skills {
                            div.skill-category {
                                h3 data-i18n=(group.key) { (tagged(document, group.key)) }
                                ul { @for item in &group.items { li { (item) } } }
                            }
                        }
                    }
                }

                section #projects.section {
                    h2.section-title data-i18n="projects.title" { (tagged(document, "projects.title")) }
                    div.projects-grid id=(Slot::Projects.id()) { (slot(document, Slot::Projects)) }
                }

                section #articles.section {
                    h2.section-title data-i18n="articles.title" { (tagged(document, "articles.title")) }
                    div.articles-list id=(Slot::Articles.id()) { (slot(document, Slot::Articles)) }
                }

                section #cv.section {
                    h2.section-title data-i18n="cv.title" { (tagged(document, "cv.title")) }
                    div.cv-container {
                        iframe #cvPreview.cv-preview src=(cv_url) title=(options.cv.file_name) style="display: block;" {}
                        a #downloadCvBtn.btn.btn-primary href=(cv_url) download=(options.cv.file_name) data-i18n="cv.download" {
                            (tagged(document, "cv.download"))
                        }
                    }
                }

                section #contact.section {
                    h2.section-title data-i18n="contact.title" { (tagged(document, "contact.title")) }
                    form #contactForm.contact-form data-sent-label=(receipt.button_label) data-reset-after=(receipt.reset_after.as_millis()) {
                        @for (field, key) in [("name", "contact.name"), ("email", "contact.email"), ("subject", "contact.subject")] {
                            div.form-group {
                                label for=(field) data-i18n=(key) { (tagged(document, key)) }
                                input id=(field) type=(if field == "email" { "email" } else { "text" }) name=(field) required;
                            }
                        }
                        div.form-group {
                            label for="message" data-i18n="contact.message" { (tagged(document, "contact.message")) }
                            textarea #message name="message" rows="5" required {}
                        }
                        button.btn.btn-primary type="submit" data-i18n="contact.send" { (tagged(document, "contact.send")) }
                    }
                }

                footer.footer {
                    p { "© " (options.author) " - " span data-i18n="footer.rights" { (tagged(document, "footer.rights")) } }
                }

                script { (PreEscaped(PAGE_SCRIPT)) }
            }
        }
    }
}
