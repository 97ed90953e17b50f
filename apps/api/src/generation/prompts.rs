// LLM prompt constants for program generation.

/// Program generation prompt template.
/// Replace: {niveau}, {duree}, {attention}, {matiere}, {passion}.
///
/// `{niveau}`, `{attention}` and `{passion}` receive the natural-language
/// expansions of their codes; `{matiere}` and `{duree}` are interpolated
/// verbatim. The bracketed `[Image : description]` instruction is what the
/// markdown renderer's callout blocks rely on downstream.
pub const PROGRAM_PROMPT_TEMPLATE: &str = r#"Crée un programme de révision pour enfant CP {niveau}.

PARAMÈTRES :
- Durée : {duree}
- Attention : {attention}
- Matière focus : {matiere}
- Thème passion : {passion}

CONTRAINTES IMPORTANTES :
- Style authentique de manuel scolaire (phrases courtes, vocabulaire précis, pas d'adjectifs forcés)
- Conforme aux programmes 2025 (nombres selon niveau, lecture adaptée)
- Include systématiquement des descriptions d'illustrations : [Image : description]
- Ajoute des rappels pédagogiques avant chaque exercice de maths
- Questions de compréhension pour chaque texte
- Format prêt à imprimer en PDF

STYLE LECTURE :
- Textes documentaires simples
- Phrases courtes et directes
- Information factuelle (pas de conte)
- Vocabulaire adapté au niveau

STYLE MATHS :
- Rappel de la notion avec exemple concret avant exercice
- Manipulations visuelles décrites
- Progression logique
- Exercices variés

STRUCTURE DEMANDÉE :
- Programme jour par jour
- Alternance lecture/maths
- Conseils pour les parents
- Activité créative bonus

Génère le programme complet au format markdown avec tous les détails."#;
