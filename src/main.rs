mod embedder;
mod llm;
mod loader;
mod retriever;
mod vector_db;

use anyhow::Result;
use embedder::{Embedder, FastEmbedder};
use llm::{ChatModel, LlmClient, LlmConfig};
use retriever::Retriever;
use std::io::{self, BufRead, Write};

const DOCS_PATH: &str = "docs.txt";
const TOP_K: usize = 3;

/// Interactive question loop: read a line, retrieve the closest chunks,
/// forward context plus question to the model, print the reply. Ends on EOF
/// or the exit sentinel. An LLM failure is reported and the loop continues;
/// every other failure propagates.
fn run_loop<E: Embedder, L: ChatModel>(
    input: &mut impl BufRead,
    output: &mut impl Write,
    retriever: &mut Retriever<E>,
    llm: &L,
) -> Result<()> {
    loop {
        write!(output, "Ask a question: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") {
            break;
        }

        let context_chunks = retriever.retrieve(question, TOP_K)?;
        if context_chunks.is_empty() {
            writeln!(output, "No relevant context found.")?;
            continue;
        }

        let context = context_chunks.join("\n");
        writeln!(output, "\nContext:\n{context}")?;

        match llm.chat(llm::SYSTEM_PROMPT, &llm::build_user_message(&context, question)) {
            Ok(answer) => writeln!(output, "\nAnswer: {answer}\n")?,
            Err(e) => writeln!(output, "LLM Error: {e}")?,
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let config = LlmConfig::from_env()?;
    let llm = LlmClient::new(config);

    println!("Reading '{DOCS_PATH}'...");
    let chunks = loader::load_chunks(DOCS_PATH)?;

    println!("Loading embedding model (first run will download it)...");
    let embedder = FastEmbedder::new()?;

    let mut retriever = Retriever::new(embedder);
    retriever.index(&chunks)?;
    println!(
        "Indexed {} chunks. Type 'exit' to quit.",
        retriever.indexed_count()?
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_loop(&mut input, &mut output, &mut retriever, &llm)
}
