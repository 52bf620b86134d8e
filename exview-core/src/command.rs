//! Keyword command detection for the assistant prompt.
//!
//! Free text typed or dictated by the user is scanned for viewer intents
//! ("explode the model", "vista normal", ...). Matching is a plain
//! case-insensitive substring search; the first intent whose keyword list
//! hits wins, in the order of [`Intent::ALL`].

use crate::controls::Action;

/// Explosion factor the assistant selects for an explosion request
pub const ASSISTANT_EXPLOSION_FACTOR: f64 = 5.0;

/// Recognised user intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Explosion,
    Normal,
    Rotate,
    Zoom,
    Navigate,
    Models,
    AugmentedReality,
    Help,
    /// No keyword matched; the text is ordinary conversation
    Conversation,
}

impl Intent {
    /// Match priority, highest first
    pub const ALL: [Intent; 8] = [
        Intent::Explosion,
        Intent::Normal,
        Intent::Rotate,
        Intent::Zoom,
        Intent::Navigate,
        Intent::Models,
        Intent::AugmentedReality,
        Intent::Help,
    ];

    /// Viewer action for intents the viewer can carry out directly
    pub fn action(&self) -> Option<Action> {
        match self {
            Intent::Explosion => Some(Action::SetFactor(ASSISTANT_EXPLOSION_FACTOR)),
            Intent::Normal => Some(Action::Reset),
            _ => None,
        }
    }
}

/// Supported prompt languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    Spanish,
    #[default]
    English,
    French,
}

impl Language {
    /// Parse an ISO 639-1 code; unknown codes give `None`
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "es" => Some(Language::Spanish),
            "en" => Some(Language::English),
            "fr" => Some(Language::French),
            _ => None,
        }
    }

    fn keywords(&self, intent: Intent) -> &'static [&'static str] {
        use Intent::*;
        match (self, intent) {
            (Language::Spanish, Explosion) => &["explotar", "explosión", "desmontar", "separar"],
            (Language::Spanish, Normal) => &["normal", "restaurar", "reset", "volver"],
            (Language::Spanish, Rotate) => &["rotar", "girar", "rotación"],
            (Language::Spanish, Zoom) => &["zoom", "acercar", "alejar"],
            (Language::Spanish, Navigate) => &["ir a", "navegar", "abrir", "mostrar"],
            (Language::Spanish, Models) => &["modelos", "catálogo", "galería"],
            (Language::Spanish, AugmentedReality) => &["realidad aumentada", "ar", "aumentada"],
            (Language::Spanish, Help) => &["ayuda", "ayúdame", "cómo", "qué puedo"],

            (Language::English, Explosion) => &["explode", "explosion", "disassemble", "separate"],
            (Language::English, Normal) => &["normal", "restore", "reset", "back"],
            (Language::English, Rotate) => &["rotate", "turn", "rotation"],
            (Language::English, Zoom) => &["zoom", "zoom in", "zoom out", "closer"],
            (Language::English, Navigate) => &["go to", "navigate", "open", "show"],
            (Language::English, Models) => &["models", "catalog", "gallery"],
            (Language::English, AugmentedReality) => &["augmented reality", "ar", "augmented"],
            (Language::English, Help) => &["help", "help me", "how", "what can"],

            (Language::French, Explosion) => &["exploser", "explosion", "démonter", "séparer"],
            (Language::French, Normal) => &["normal", "restaurer", "reset", "retour"],
            (Language::French, Rotate) => &["tourner", "rotation"],
            (Language::French, Zoom) => &["zoom", "agrandir", "réduire"],
            (Language::French, Navigate) => &["aller à", "naviguer", "ouvrir", "montrer"],
            (Language::French, Models) => &["modèles", "catalogue", "galerie"],
            (Language::French, AugmentedReality) => &["réalité augmentée", "ra", "augmentée"],
            (Language::French, Help) => &["aide", "aidez-moi", "comment", "que puis-je"],

            (_, Conversation) => &[],
        }
    }
}

/// Result of [`detect`].
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub intent: Intent,
    pub confidence: f64,
    pub language: Language,
}

impl Detection {
    /// Scripted assistant answer for the detected intent, in the detected
    /// language. Intents with no dedicated answer get the general one.
    pub fn reply(&self) -> &'static str {
        use Intent::*;
        use Language::*;
        match (self.intent, self.language) {
            (Explosion, Spanish) => "¡Perfecto! Activando la vista de explosión del modelo 3D. Ahora puedes ver todos los componentes separados para una mejor comprensión de la estructura. ¿Te gustaría ajustar el nivel de explosión o explorar alguna parte específica?",
            (Explosion, English) => "Perfect! Activating the 3D model explosion view. Now you can see all components separated for better understanding of the structure. Would you like to adjust the explosion level or explore a specific part?",
            (Explosion, French) => "Parfait ! Activation de la vue d'explosion du modèle 3D. Maintenant vous pouvez voir tous les composants séparés pour une meilleure compréhension de la structure. Souhaitez-vous ajuster le niveau d'explosion ?",

            (Normal, Spanish) => "Restaurando la vista normal del modelo. Ahora puedes ver el modelo completamente ensamblado. ¿Quieres explorarlo desde diferentes ángulos o activar alguna otra función?",
            (Normal, English) => "Restoring normal model view. Now you can see the fully assembled model. Want to explore it from different angles or activate another function?",
            (Normal, French) => "Restauration de la vue normale du modèle. Maintenant vous pouvez voir le modèle entièrement assemblé. Voulez-vous l'explorer sous différents angles ?",

            (Navigate, Spanish) => "Te estoy llevando a la sección solicitada. ¡Exploremos juntos!",
            (Navigate, English) => "Taking you to the requested section. Let's explore together!",
            (Navigate, French) => "Je vous emmène à la section demandée. Explorons ensemble !",

            (Help, Spanish) => "¡Hola! Soy STEPVOICE AI, tu asistente de modelos 3D. Puedo ayudarte con:\n\
                - Explorar modelos 3D con comandos de voz\n\
                - Controlar explosiones y vistas\n\
                - Navegar por la aplicación\n\
                - Explicar conceptos de realidad aumentada\n\
                - Configurar materiales y animaciones\n\
                Di cosas como: \"explotar modelo\", \"vista normal\", \"ir a catálogo\", \"ayuda con AR\". ¿Qué te gustaría hacer?",
            (Help, English) => "Hello! I'm STEPVOICE AI, your 3D model assistant. I can help you with:\n\
                - Explore 3D models with voice commands\n\
                - Control explosions and views\n\
                - Navigate through the application\n\
                - Explain augmented reality concepts\n\
                - Configure materials and animations\n\
                Say things like: \"explode model\", \"normal view\", \"go to catalog\", \"help with AR\". What would you like to do?",
            (Help, French) => "Bonjour ! Je suis STEPVOICE AI, votre assistant de modèles 3D. Je peux vous aider avec :\n\
                - Explorer des modèles 3D avec des commandes vocales\n\
                - Contrôler les explosions et les vues\n\
                - Naviguer dans l'application\n\
                - Expliquer les concepts de réalité augmentée\n\
                - Configurer les matériaux et animations\n\
                Dites des choses comme : \"exploser le modèle\", \"vue normale\", \"aller au catalogue\". Que souhaiteriez-vous faire ?",

            (_, Spanish) => "Entiendo tu consulta sobre modelos 3D. Como asistente especializado, puedo ayudarte a explorar y manipular modelos tridimensionales. ¿Te gustaría que activemos alguna función específica como la vista de explosión o navegación?",
            (_, English) => "I understand your 3D model query. As a specialized assistant, I can help you explore and manipulate three-dimensional models. Would you like me to activate any specific function like explosion view or navigation?",
            (_, French) => "Je comprends votre requête sur les modèles 3D. En tant qu'assistant spécialisé, je peux vous aider à explorer et manipuler des modèles tridimensionnels. Souhaitez-vous que j'active une fonction spécifique ?",
        }
    }
}

/// Detect the intent of `text` using the keyword table for `language`.
pub fn detect(text: &str, language: Language) -> Detection {
    let lowered = text.to_lowercase();
    let intent = Intent::ALL
        .into_iter()
        .find(|&intent| {
            language
                .keywords(intent)
                .iter()
                .any(|keyword| lowered.contains(keyword))
        })
        .unwrap_or(Intent::Conversation);

    let confidence = if intent == Intent::Conversation { 0.9 } else { 0.8 };
    Detection {
        intent,
        confidence,
        language,
    }
}

/// Like [`detect`] but takes a language code, falling back to English.
pub fn detect_with_code(text: &str, code: &str) -> Detection {
    detect(text, Language::from_code(code).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_explode() {
        let detection = detect("Please EXPLODE the chair", Language::English);
        assert_eq!(detection.intent, Intent::Explosion);
        assert_eq!(detection.confidence, 0.8);
        assert_eq!(detection.intent.action(), Some(Action::SetFactor(5.0)));
        assert!(detection.reply().starts_with("Perfect! Activating"));
    }

    #[test]
    fn test_explosion_sets_mid_range_factor() {
        let mut state = crate::ViewerState::default();
        let detection = detect_with_code("explotar el modelo", "es");
        if let Some(action) = detection.intent.action() {
            state.apply(action);
        }
        assert_eq!(state.factor(), 5.0);
        assert!(detection.reply().contains("vista de explosión"));
    }

    #[test]
    fn test_replies_follow_language() {
        let normal = detect("retour à la vue initiale", Language::French);
        assert_eq!(normal.intent, Intent::Normal);
        assert!(normal.reply().starts_with("Restauration de la vue normale"));

        let navigate = detect("go to the catalog", Language::English);
        assert_eq!(navigate.intent, Intent::Navigate);
        assert_eq!(navigate.reply(), "Taking you to the requested section. Let's explore together!");

        let help = detect("ayuda por favor", Language::Spanish);
        assert_eq!(help.intent, Intent::Help);
        assert!(help.reply().contains("- Controlar explosiones y vistas\n"));
    }

    #[test]
    fn test_intents_without_answer_get_general_reply() {
        let rotate = detect("rotate it", Language::English);
        let chat = detect("good morning", Language::English);
        assert_eq!(rotate.reply(), chat.reply());
        assert!(chat.reply().starts_with("I understand your 3D model query."));
    }

    #[test]
    fn test_spanish_reset() {
        let detection = detect_with_code("quiero volver a la vista inicial", "es");
        assert_eq!(detection.intent, Intent::Normal);
        assert_eq!(detection.intent.action(), Some(Action::Reset));
    }

    #[test]
    fn test_french_accented_keyword() {
        let detection = detect("Peux-tu DÉMONTER la chaise ?", Language::French);
        assert_eq!(detection.intent, Intent::Explosion);
    }

    #[test]
    fn test_priority_order() {
        // "explode" and "reset" both present: explosion is checked first
        let detection = detect("reset then explode", Language::English);
        assert_eq!(detection.intent, Intent::Explosion);
    }

    #[test]
    fn test_unknown_code_falls_back_to_english() {
        let detection = detect_with_code("rotate it", "de");
        assert_eq!(detection.language, Language::English);
        assert_eq!(detection.intent, Intent::Rotate);
        assert_eq!(detection.intent.action(), None);
    }

    #[test]
    fn test_conversation() {
        let detection = detect("good morning", Language::English);
        assert_eq!(detection.intent, Intent::Conversation);
        assert_eq!(detection.confidence, 0.9);
    }
}
