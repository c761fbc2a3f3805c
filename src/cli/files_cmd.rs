//! File screen commands

use std::path::PathBuf;

use crate::application::ports::FilePicker;
use crate::application::ImportOutcome;
use crate::infrastructure::{PathPicker, RfdPicker};

use super::app::{AppContext, CliFileController, EXIT_ERROR, EXIT_SUCCESS};
use super::args::FilesAction;
use super::input::{is_yes, stdin_lines};
use super::presenter::Presenter;

/// Handle files subcommand
pub async fn handle_files_command(
    action: FilesAction,
    context: &AppContext,
    presenter: &Presenter,
) -> u8 {
    let picker: Box<dyn FilePicker> = match &action {
        FilesAction::Import { path: Some(path) } => Box::new(PathPicker::new(path.clone())),
        _ => Box::new(RfdPicker::new()),
    };
    let mut controller = context.file_controller(picker);

    match action {
        FilesAction::List { search } => {
            controller.load().await;
            list(&mut controller, search, presenter)
        }
        FilesAction::Import { path } => {
            controller.load().await;
            import(&mut controller, path, presenter).await
        }
        FilesAction::Open { file } => {
            controller.load().await;
            open(&controller, &file, presenter).await
        }
        FilesAction::Clear { yes } => {
            controller.load().await;
            clear(&mut controller, yes, presenter).await
        }
        FilesAction::Formats => {
            controller.show_format_help().await;
            EXIT_SUCCESS
        }
    }
}

fn list(controller: &mut CliFileController, search: Option<String>, presenter: &Presenter) -> u8 {
    if let Some(search) = search {
        controller.set_search(search);
    }

    let visible = controller.visible_items();
    if visible.is_empty() {
        if controller.search().is_empty() {
            presenter.info("No files yet");
        } else {
            presenter.info(&format!("No files match '{}'", controller.search().as_str()));
        }
        return EXIT_SUCCESS;
    }

    for file in visible {
        presenter.file_row(file);
    }
    EXIT_SUCCESS
}

async fn import(
    controller: &mut CliFileController,
    path: Option<PathBuf>,
    presenter: &Presenter,
) -> u8 {
    if path.is_none() {
        presenter.info("Choose a file to import...");
    }

    match controller.import_file().await {
        ImportOutcome::Imported(file) => {
            presenter.output(&file.id);
            EXIT_SUCCESS
        }
        ImportOutcome::Cancelled => {
            presenter.info("Import cancelled");
            EXIT_SUCCESS
        }
        ImportOutcome::Failed => EXIT_ERROR,
    }
}

async fn open(controller: &CliFileController, file: &str, presenter: &Presenter) -> u8 {
    let Some(id) = controller.find(file).map(|f| f.id.clone()) else {
        presenter.error(&format!("No file matches '{}'", file));
        return EXIT_ERROR;
    };

    if controller.open_file(&id).await {
        EXIT_SUCCESS
    } else {
        EXIT_ERROR
    }
}

async fn clear(controller: &mut CliFileController, yes: bool, presenter: &Presenter) -> u8 {
    let count = controller.items().len();
    controller.request_clear_all().await;

    if !yes && !read_confirmation(presenter).await {
        controller.cancel_clear_all();
        presenter.info("Nothing deleted");
        return EXIT_SUCCESS;
    }

    if controller.confirm_clear_all().await {
        presenter.success(&format!("Deleted {} file entr{}", count, if count == 1 { "y" } else { "ies" }));
        EXIT_SUCCESS
    } else {
        EXIT_ERROR
    }
}

/// Ask on the terminal; anything but y/yes declines
async fn read_confirmation(presenter: &Presenter) -> bool {
    presenter.prompt("Delete all files? [y/N]");
    let mut lines = stdin_lines();
    lines.recv().await.is_some_and(|answer| is_yes(&answer))
}
