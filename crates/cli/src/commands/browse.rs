use std::io::{self, BufRead, Write};

use bookfinder_client::SearchClient;
use bookfinder_storage::FavoritesStore;
use bookfinder_types::SearchParams;
use eyre::Result;

use crate::app::{App, Intent, help_text};

/// Handle the browse command: a long-lived interactive session over
/// stdin, one intent per line.
pub async fn handle_browse_command(
    params: SearchParams,
    client: SearchClient,
    favorites: FavoritesStore,
) -> Result<()> {
    let mut app = App::new(params, client, favorites);
    app.start().await;

    println!("{}", help_text());

    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        println!("\n{}", app.render());
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        // EOF ends the session like an explicit quit.
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match App::parse_intent(&line) {
            Ok(Intent::Quit) => break,
            Ok(Intent::Help) => println!("{}", help_text()),
            Ok(intent) => {
                if let Some(notice) = app.handle(intent).await {
                    println!("{notice}");
                }
            }
            Err(message) => println!("{message}"),
        }
    }

    Ok(())
}
