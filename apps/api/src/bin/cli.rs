//! Terminal front-end: runs the questionnaire, submits it to the API, writes
//! the rendered HTML document, and offers the PDF download.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use programme_api::export;
use programme_api::form::{ApiClient, FormController, Question};
use programme_api::render;

const DEFAULT_API_URL: &str = "http://localhost:8080";
const HTML_OUTPUT: &str = "programme-cp.html";

/// One questionnaire group: prompt text plus its (wire code, label) options.
struct QuestionSpec {
    question: Question,
    prompt: &'static str,
    options: &'static [(&'static str, &'static str)],
}

const QUESTIONS: &[QuestionSpec] = &[
    QuestionSpec {
        question: Question::Niveau,
        prompt: "Où en est votre enfant dans son année de CP ?",
        options: &[
            ("1", "Début d'année (septembre-octobre)"),
            ("2", "Milieu d'année (novembre-mars)"),
            ("3", "Fin d'année (avril-juin)"),
        ],
    },
    QuestionSpec {
        question: Question::Attention,
        prompt: "Combien de temps reste-t-il concentré ?",
        options: &[
            ("15", "15 minutes"),
            ("30", "30 minutes"),
            ("45", "45 minutes"),
        ],
    },
    QuestionSpec {
        question: Question::Matiere,
        prompt: "Quelle matière renforcer en priorité ?",
        options: &[
            ("lecture", "La lecture"),
            ("maths", "Les maths"),
            ("equilibre", "Un équilibre des deux"),
        ],
    },
    QuestionSpec {
        question: Question::Passion,
        prompt: "Qu'est-ce qui le passionne ?",
        options: &[
            ("animaux", "Les animaux"),
            ("superheros", "Les super-héros"),
            ("princesses", "Les princesses"),
            ("voitures", "Les voitures"),
            ("sport", "Le sport"),
        ],
    },
    QuestionSpec {
        question: Question::Duree,
        prompt: "Sur quelle durée ?",
        options: &[
            ("1 semaine", "1 semaine"),
            ("2 semaines", "2 semaines"),
            ("vacances", "Toutes les vacances"),
        ],
    },
];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url =
        std::env::var("PROGRAMME_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let client = ApiClient::new(base_url);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut controller = FormController::new();

    println!("🎒 Programme CP Sur-Mesure\n");

    loop {
        run_questionnaire(&mut controller, &mut input)?;

        let form = match controller.begin_submit() {
            Ok(form) => form,
            Err(err) => {
                // Redundant with the endpoint's check, mirroring the form's
                // own presence validation.
                println!("{err}");
                continue;
            }
        };

        println!("\n⏳ Génération du programme en cours...\n");

        match client.generate(&form).await {
            Ok(content) => {
                controller.on_success(content);
                break;
            }
            Err(err) => {
                error!("generation failed: {err}");
                controller.on_failure();
                println!("😓 Désolé, une erreur est survenue. Veuillez réessayer.\n");
            }
        }
    }

    let document = controller
        .document()
        .context("result panel without a document")?;

    let page = render::wrap_document(
        export::DOCUMENT_TITLE,
        &render::markdown_to_html(&document.content),
    );
    std::fs::write(HTML_OUTPUT, page)
        .with_context(|| format!("failed to write {HTML_OUTPUT}"))?;
    println!("📄 Programme enregistré dans {HTML_OUTPUT}");

    if ask_yes_no("Télécharger le PDF ? (o/n) ", &mut input)? {
        let today = chrono::Local::now().date_naive();
        match export::generate_pdf(&document.content, today) {
            Ok(bytes) => {
                let filename = export::export_filename(today);
                std::fs::write(&filename, bytes)
                    .with_context(|| format!("failed to write {filename}"))?;
                println!("📥 PDF téléchargé : {filename}");
            }
            Err(err) => {
                error!("PDF export failed: {err}");
                println!("😓 Erreur lors de la génération du PDF.");
            }
        }
    }

    Ok(())
}

/// Asks the five questions in order, one radio group at a time.
fn run_questionnaire(controller: &mut FormController, input: &mut impl BufRead) -> Result<()> {
    for spec in QUESTIONS {
        println!("{}", spec.prompt);
        for (i, (_, label)) in spec.options.iter().enumerate() {
            println!("  {}. {label}", i + 1);
        }

        let choice = loop {
            print!("Votre choix [1-{}] : ", spec.options.len());
            std::io::stdout().flush()?;
            let line = read_line(input)?;
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=spec.options.len()).contains(&n) => break n - 1,
                _ => println!("Réponse invalide."),
            }
        };

        controller.state.select(spec.question, spec.options[choice].0);
        println!();
    }
    Ok(())
}

fn ask_yes_no(prompt: &str, input: &mut impl BufRead) -> Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let line = read_line(input)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "o" | "oui" | "y" | "yes"))
}

fn read_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line).context("failed to read stdin")?;
    Ok(line)
}
