//! Native file dialogs for opening and saving images.

use gridpaint_core::Editor;

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "tga"];

/// Ask for an image and load it into the editor.
pub fn open_image(editor: &mut Editor) -> bool {
    let dialog = rfd::FileDialog::new()
        .set_title("Open Image")
        .add_filter("Images", &IMAGE_EXTENSIONS);

    let Some(path) = dialog.pick_file() else {
        return false;
    };
    match editor.load_from(&path) {
        Ok(()) => {
            log::info!("Opened image: {:?}", path);
            true
        }
        Err(e) => {
            log::error!("Failed to open {:?}: {}", path, e);
            false
        }
    }
}

/// Ask for a destination and save the canvas there.
pub fn save_image(editor: &Editor) {
    let dialog = rfd::FileDialog::new()
        .set_title("Save Image")
        .set_file_name("untitled.png")
        .add_filter("PNG Image", &["png"])
        .add_filter("JPEG Image", &["jpg", "jpeg"])
        .add_filter("TGA Image", &["tga"]);

    if let Some(path) = dialog.save_file() {
        if let Err(e) = editor.save_to(&path) {
            log::error!("Failed to save {:?}: {}", path, e);
        }
    }
}
