//! English and French text for the navigation bar and contact form.

use folio_types::event::FormField;
use folio_types::{Language, SectionId};

/// Nav-bar link label for `section`.
pub fn nav_label(section: SectionId, language: Language) -> &'static str {
    match (language, section) {
        (Language::En, SectionId::Home) => "Home",
        (Language::En, SectionId::About) => "About",
        (Language::En, SectionId::Skills) => "Skills",
        (Language::En, SectionId::Projects) => "Projects",
        (Language::En, SectionId::Achievements) => "Achievements",
        (Language::En, SectionId::Contact) => "Contact",
        (Language::Fr, SectionId::Home) => "Accueil",
        (Language::Fr, SectionId::About) => "À propos",
        (Language::Fr, SectionId::Skills) => "Compétences",
        (Language::Fr, SectionId::Projects) => "Projets",
        (Language::Fr, SectionId::Achievements) => "Réalisations",
        (Language::Fr, SectionId::Contact) => "Contact",
    }
}

/// Caption of the language toggle: the language a click switches to.
pub fn language_toggle_caption(current: Language) -> &'static str {
    match current.toggled() {
        Language::En => "EN",
        Language::Fr => "FR",
    }
}

/// Contact form strings for one language.
#[derive(Debug)]
pub struct ContactText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub name_label: &'static str,
    pub email_label: &'static str,
    pub message_label: &'static str,
    pub send: &'static str,
    pub sending: &'static str,
    pub success: &'static str,
    pub error: &'static str,
    pub name_required: &'static str,
    pub email_required: &'static str,
    pub email_invalid: &'static str,
    pub message_required: &'static str,
}

static CONTACT_EN: ContactText = ContactText {
    title: "Contact Me",
    subtitle: "Get in Touch",
    name_label: "Your Name",
    email_label: "Your Email",
    message_label: "Your Message",
    send: "Send Message",
    sending: "Sending...",
    success: "Thank you! I will get back to you as soon as possible.",
    error: "Oops! Something went wrong. Please try again.",
    name_required: "Please enter your name",
    email_required: "Please enter your email",
    email_invalid: "Please enter a valid email",
    message_required: "Please enter your message",
};

static CONTACT_FR: ContactText = ContactText {
    title: "Contactez-Moi",
    subtitle: "Entrer en Contact",
    name_label: "Votre Nom",
    email_label: "Votre Email",
    message_label: "Votre Message",
    send: "Envoyer le Message",
    sending: "Envoi en cours...",
    success: "Merci ! Je vous répondrai dès que possible.",
    error: "Oups ! Quelque chose s'est mal passé. Veuillez réessayer.",
    name_required: "Veuillez entrer votre nom",
    email_required: "Veuillez entrer votre email",
    email_invalid: "Veuillez entrer un email valide",
    message_required: "Veuillez entrer votre message",
};

impl ContactText {
    /// Input label for `field`.
    pub fn field_label(&self, field: FormField) -> &'static str {
        match field {
            FormField::Name => self.name_label,
            FormField::Email => self.email_label,
            FormField::Message => self.message_label,
        }
    }
}

pub fn contact_text(language: Language) -> &'static ContactText {
    match language {
        Language::En => &CONTACT_EN,
        Language::Fr => &CONTACT_FR,
    }
}
