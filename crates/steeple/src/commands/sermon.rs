//! Sermon commands

use anyhow::Result;
use steeple_sermons::{
    bible_books, group_by_testament, BibleBook, MediaKind, SermonData, SermonMeta, UploadsDir,
};

use crate::cli::{BooksArgs, MediaArgs, SermonCommands, TestamentArg};
use crate::output;

pub fn run(command: SermonCommands) -> Result<()> {
    match command {
        SermonCommands::Books(args) => books(args),
        SermonCommands::Media(args) => media(args),
    }
}

fn books(args: BooksArgs) -> Result<()> {
    if !args.group.is_empty() {
        let groups = group_by_testament(&args.group);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&groups)?);
        } else {
            for (label, names) in [
                ("Old Testament", &groups.old),
                ("New Testament", &groups.new),
                ("Other Books", &groups.other),
            ] {
                if names.is_empty() {
                    continue;
                }
                output::header(label);
                for name in names {
                    println!("  {}", name);
                }
            }
        }
        return Ok(());
    }

    let canon = bible_books();
    let books: Vec<BibleBook> = match args.testament {
        Some(TestamentArg::Old) => canon.old_testament().collect(),
        Some(TestamentArg::New) => canon.new_testament().collect(),
        None => canon.all().collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&books)?);
        return Ok(());
    }

    let mut current = None;
    for (index, book) in books.iter().enumerate() {
        if current != Some(book.testament) {
            output::header(book.testament.label());
            current = Some(book.testament);
        }
        println!("  {:>2}. {}", index + 1, book.name);
    }

    Ok(())
}

fn media(args: MediaArgs) -> Result<()> {
    let meta = SermonMeta {
        video: args.video,
        audio: args.audio,
        pdf: args.pdf,
        has_full_text: args.full_text,
    };
    let uploads = UploadsDir::new(args.uploads_dir, args.uploads_url);
    let data = SermonData::from_meta(&meta, &uploads);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    for kind in MediaKind::ALL {
        let file = data.media(kind);
        if file.url.is_empty() {
            continue;
        }

        output::header(kind.as_str());
        output::kv("URL", &file.url);
        if let Some(extension) = &file.extension {
            output::kv("Type", extension);
        }
        if let (Some(path), Some(size)) = (&file.path, &file.size) {
            output::kv("File", &format!("{} ({})", path, size));
        }
        output::kv(
            "Download",
            file.download_url.as_deref().unwrap_or("not downloadable"),
        );
    }

    println!();
    output::kv("Has download", &data.has_download().to_string());
    output::kv("Has full text", &data.has_full_text().to_string());

    Ok(())
}
