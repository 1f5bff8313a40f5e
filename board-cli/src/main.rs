use board_client::{BoardClientHttp, BoardClientTrait, share_url};
use clap::Parser;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(about = "Anonymous board command line client")]
struct Cli {
    /// API server, e.g. http://127.0.0.1:8080
    #[clap(short, long, env = "BOARD_SERVER", default_value = "http://127.0.0.1:8080")]
    server: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Create a topic and print its share link.
    CreateTopic {
        #[clap(long)]
        title: String,
        #[clap(long)]
        description: Option<String>,
        /// Origin the share link points at; defaults to the server.
        #[clap(long)]
        origin: Option<String>,
    },
    /// Show a topic and its posts, newest first.
    ShowTopic { slug: String },
    PostToTopic {
        #[clap(long)]
        topic_id: Uuid,
        #[clap(long)]
        content: String,
    },
    CreatePost {
        #[clap(long)]
        title: String,
        #[clap(long)]
        content: String,
    },
    ListPosts,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    let client = BoardClientHttp::connect(&args.server)?;

    match args.command {
        Command::CreateTopic {
            title,
            description,
            origin,
        } => {
            let topic = client.create_topic(title, description).await?;
            let origin = origin.as_deref().unwrap_or(client.base_url());
            println!("Topic created: {}", topic);
            println!("ID: {}", topic.id);
            println!("Share link: {}", share_url(origin, &topic.slug));
        }
        Command::ShowTopic { slug } => {
            let resolved = client.get_topic(&slug).await?;
            println!("{}", resolved.topic);
            if let Some(description) = &resolved.topic.description {
                println!("{}", description);
            }
            if resolved.posts.is_empty() {
                println!("No posts yet.");
            }
            for post in resolved.posts {
                println!("- {}", post);
            }
        }
        Command::PostToTopic { topic_id, content } => {
            let post = client.create_topic_post(topic_id, content).await?;
            println!("Post created! ID: {}", post.id);
        }
        Command::CreatePost { title, content } => {
            let post = client.create_post(title, content).await?;
            println!("Post created! ID: {}", post.id);
        }
        Command::ListPosts => {
            let posts = client.list_posts().await?;
            println!("Posts ({})", posts.len());
            for post in posts {
                println!("- {}", post);
            }
        }
    }

    Ok(())
}
