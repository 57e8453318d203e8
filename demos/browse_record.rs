/// Browse the Drive folder linked to a record from the terminal
///
/// Usage: DRIVE_ACCESS_TOKEN=... cargo run --example browse_record -- <record-id> [folder-name...]
///
/// Each extra argument names a sub-folder to descend into.

use std::sync::Arc;

use drive_navigator::{
    BrowserEvent, DriveBackend, FolderBrowser, GoogleDriveBackend, GoogleDriveConfig, SortColumn,
};

#[tokio::main]
async fn main() -> drive_navigator::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let record_id = args.next().unwrap_or_default();

    let backend = GoogleDriveBackend::new(GoogleDriveConfig::from_env()?)?;
    let (mut browser, mut events) = FolderBrowser::new(Arc::new(backend) as Arc<dyn DriveBackend>);

    if browser.mount(&record_id).await.is_ok() {
        for name in args {
            let target = browser
                .entries()
                .iter()
                .find(|e| e.is_folder() && e.name == name)
                .map(|e| e.id.clone());
            match target {
                Some(id) => {
                    if browser.open_entry(&id).await.is_err() {
                        break;
                    }
                }
                None => {
                    eprintln!("No folder named {:?}", name);
                    break;
                }
            }
        }
        browser.sort_by(SortColumn::Name);
    }

    println!("{}", browser.status_message());
    for message in browser.error_messages() {
        println!("! {}", message);
    }

    let path: Vec<&str> = browser.breadcrumbs().iter().map(|c| c.name()).collect();
    println!("/{}", path.join(" / "));
    for entry in browser.entries() {
        let marker = if entry.is_folder() { "d" } else { "-" };
        println!(
            "{} {:>12}  {:<14} {}",
            marker,
            entry.formatted_size(),
            entry.formatted_modified(),
            entry.name
        );
    }

    while let Ok(event) = events.try_recv() {
        if let BrowserEvent::Toast(toast) = event {
            eprintln!("[{}] {}", toast.title, toast.message);
        }
    }

    Ok(())
}
