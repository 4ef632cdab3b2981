use clap::Parser;

use no_nonsense_nuance::cli::{self, Cli};
use no_nonsense_nuance::session::{self, Session};
use no_nonsense_nuance::text_classification::TextClassificationPipelineBuilder;

fn main() {
    let args = Cli::parse();
    cli::configure_process();
    cli::init_tracing(args.verbose);

    let stdin = std::io::stdin();
    let mut session = Session::new(stdin.lock(), std::io::stdout());

    let result = session::run(
        &mut session,
        || {
            TextClassificationPipelineBuilder::distilbert_sentiment(args.sentiment_checkpoint())
                .device(args.device())
                .build()
        },
        || {
            TextClassificationPipelineBuilder::roberta_emotion(args.emotion_checkpoint())
                .device(args.device())
                .top_k(None)
                .build()
        },
    );

    if let Err(e) = result {
        tracing::debug!(error = ?e, "run ended early");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
