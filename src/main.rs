use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use estate_client::api::{HttpApi, ListingApi, SearchParams};
use estate_client::config::Config;
use estate_client::models::{Property, PropertyType, Purpose, RentFrequency, UserId};
use estate_client::session::{FileSessionStore, SessionContext};
use estate_client::views::auth::{AuthForm, AuthMode, AUTH_FAILED};
use estate_client::views::format::upload_url;
use estate_client::views::submit::parse_amount;
use estate_client::views::{
    home, Dashboard, ListingDraft, ListingView, OwnerLink, PropertyDetails, PublicProfile,
    SettingsForm, Tab, ToggleOutcome,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "estate")]
#[command(about = "Browse, favorite and publish real-estate listings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login { email: String, password: String },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },

    /// Sign out
    Logout,

    /// Show who is signed in
    Whoami,

    /// Switch the interface language between EN and AR
    Lang,

    /// Search listings
    Search {
        #[arg(short, long)]
        location: Option<String>,
        #[arg(long)]
        purpose: Option<Purpose>,
        #[arg(long = "type")]
        property_type: Option<PropertyType>,
        #[arg(long)]
        rent_frequency: Option<RentFrequency>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long)]
        min_area: Option<u32>,
        #[arg(long)]
        max_area: Option<u32>,
        #[arg(long)]
        beds: Option<u32>,
        #[arg(long)]
        baths: Option<u32>,
        /// Results page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Also write every result to this JSON file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Show featured listings
    Featured,

    /// Show one listing
    Show {
        id: i64,
        /// Open the gallery at this photo (1-based) instead of listing them all
        #[arg(long)]
        photo: Option<usize>,
    },

    /// Toggle a listing in or out of your favorites
    Favorite { id: i64 },

    /// Your listings and favorites
    Dashboard {
        #[arg(long, value_enum, default_value_t = TabArg::Listings)]
        tab: TabArg,
        /// Toggle the favorite on this listing from the selected tab
        #[arg(long)]
        toggle: Option<i64>,
    },

    /// Show another user's public profile
    Profile { user_id: UserId },

    /// Update your profile settings
    UpdateProfile {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        old_password: Option<String>,
        #[arg(long)]
        new_password: Option<String>,
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Upload a new profile picture
    Avatar { file: PathBuf },

    /// Publish a new listing
    AddProperty {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Price, thousands separators allowed (e.g. 1,250,000)
        #[arg(long)]
        price: String,
        #[arg(long)]
        area: String,
        #[arg(long)]
        location: String,
        #[arg(long = "type", default_value = "APARTMENT")]
        property_type: PropertyType,
        #[arg(long, default_value = "RENT")]
        purpose: Purpose,
        #[arg(long)]
        rent_frequency: Option<RentFrequency>,
        #[arg(long)]
        rooms: Option<u32>,
        #[arg(long)]
        baths: Option<u32>,
        /// Photo to upload; repeat for more (1 to 10)
        #[arg(long = "image", required = true)]
        images: Vec<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TabArg {
    Listings,
    Favorites,
}

impl From<TabArg> for Tab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::Listings => Tab::Listings,
            TabArg::Favorites => Tab::Favorites,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let api = HttpApi::new(&config.api_base_url).context("Failed to create HTTP client")?;
    let mut session = SessionContext::open(Box::new(FileSessionStore::new(&config.session_file)))
        .context("Failed to read session")?;

    info!("🏠 Estate client ({})", api.backend_name());

    match cli.command {
        Commands::Login { email, password } => {
            authenticate(&api, &mut session, AuthForm::login(&email, &password)).await
        }
        Commands::Register {
            first_name,
            last_name,
            email,
            phone,
            password,
            confirm_password,
        } => {
            let form = AuthForm {
                mode: AuthMode::Register,
                first_name,
                last_name,
                email,
                phone_number: phone,
                password,
                confirm_password,
            };
            authenticate(&api, &mut session, form).await
        }
        Commands::Logout => {
            session.clear()?;
            println!("Signed out.");
            Ok(())
        }
        Commands::Whoami => {
            match session.display_name() {
                Some(name) => println!("Signed in as {}", name),
                None => println!("Browsing as guest"),
            }
            println!("Language: {}", session.language());
            Ok(())
        }
        Commands::Lang => {
            let language = session.toggle_language()?;
            println!("Language set to {}", language);
            Ok(())
        }
        Commands::Search {
            location,
            purpose,
            property_type,
            rent_frequency,
            min_price,
            max_price,
            min_area,
            max_area,
            beds,
            baths,
            page,
            save,
        } => {
            let params = SearchParams {
                location,
                purpose,
                property_type,
                rent_frequency,
                min_price,
                max_price,
                min_area,
                max_area,
                beds,
                baths,
            };
            search(&api, &session, &config, &params, page, save).await
        }
        Commands::Featured => {
            let properties = home::featured(&api).await;
            if properties.is_empty() {
                println!("No featured listings right now.");
            }
            print_cards(&properties, &config);
            Ok(())
        }
        Commands::Show { id, photo } => show(&api, &session, &config, id, photo).await,
        Commands::Favorite { id } => favorite(&api, &session, &config, id).await,
        Commands::Dashboard { tab, toggle } => {
            dashboard(&api, &session, &config, tab.into(), toggle).await
        }
        Commands::Profile { user_id } => {
            let Some(page) = PublicProfile::load(&api, user_id).await else {
                println!("User not found.");
                return Ok(());
            };
            println!("{}", page.profile.full_name());
            if let Some(phone) = &page.profile.phone_number {
                println!("📞 {}", phone);
            }
            if let Some(bio) = &page.profile.bio {
                println!("{}", bio);
            }
            println!("\n{} listings\n", page.listings.len());
            print_cards(&page.listings, &config);
            Ok(())
        }
        Commands::UpdateProfile {
            first_name,
            last_name,
            email,
            phone,
            bio,
            old_password,
            new_password,
            confirm_password,
        } => {
            let mut dashboard = Dashboard::load(&api, &session).await?;
            let current = dashboard
                .user()
                .cloned()
                .context("Could not load your profile")?;
            let defaults = SettingsForm::from_profile(&current);
            let form = SettingsForm {
                first_name: first_name.unwrap_or(defaults.first_name),
                last_name: last_name.unwrap_or(defaults.last_name),
                email: email.unwrap_or(defaults.email),
                phone_number: phone.or(defaults.phone_number),
                bio: bio.or(defaults.bio),
                old_password,
                new_password,
                confirm_password,
            };
            match dashboard.save_settings(&api, &mut session, &form).await {
                Ok(user) => println!("Profile updated for {}.", user.full_name()),
                Err(e) => println!("{}", e.user_message("Failed to update profile")),
            }
            Ok(())
        }
        Commands::Avatar { file } => {
            let mut dashboard = Dashboard::load(&api, &session).await?;
            match dashboard.upload_avatar(&api, &session, &file).await {
                Ok(name) => println!("Avatar uploaded: {}", upload_url(&config.uploads_base_url, &name)),
                Err(e) => {
                    warn!("Avatar upload failed: {}", e);
                    println!("Failed to upload image");
                }
            }
            Ok(())
        }
        Commands::AddProperty {
            title,
            description,
            price,
            area,
            location,
            property_type,
            purpose,
            rent_frequency,
            rooms,
            baths,
            images,
        } => {
            let mut draft = ListingDraft::default();
            draft.title = title;
            draft.description = description;
            draft.price = parse_amount(&price);
            draft.area = parse_amount(&area);
            draft.location = location;
            draft.room_count = rooms;
            draft.bath_count = baths;
            draft.set_type(property_type);
            draft.set_purpose(purpose);
            if let Some(frequency) = rent_frequency {
                draft.set_rent_frequency(frequency);
            }
            draft.add_images(images)?;

            match draft.publish(&api, &session).await {
                Ok(confirmation) => println!("✅ {}", confirmation),
                Err(estate_client::ClientError::LoginRequired) => {
                    println!("Session expired. Please login again.")
                }
                Err(e) => println!("{}", e.user_message("Failed to publish listing.")),
            }
            Ok(())
        }
    }
}

async fn authenticate(
    api: &dyn ListingApi,
    session: &mut SessionContext,
    form: AuthForm,
) -> anyhow::Result<()> {
    match form.submit(api, session).await {
        Ok(_) => println!("Welcome, {}!", session.display_name().unwrap_or("User")),
        Err(e) => println!("{}", e.user_message(AUTH_FAILED)),
    }
    Ok(())
}

async fn search(
    api: &dyn ListingApi,
    session: &SessionContext,
    config: &Config,
    params: &SearchParams,
    page: usize,
    save: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut results = home::search(api, session, params, config.page_size).await;

    if results.is_empty() {
        println!("No properties found. Try adjusting your filters or location.");
        return Ok(());
    }

    let page = results.select_page(page);
    println!(
        "Search Results ({} found) - page {}/{}\n",
        results.len(),
        page,
        results.page_count()
    );
    print_cards(results.items(), config);

    if let Some(path) = save {
        let json = serde_json::to_string_pretty(results.all())?;
        tokio::fs::write(&path, json).await?;
        info!("💾 Saved {} properties to {}", results.len(), path.display());
    }

    Ok(())
}

async fn show(
    api: &dyn ListingApi,
    session: &SessionContext,
    config: &Config,
    id: i64,
    photo: Option<usize>,
) -> anyhow::Result<()> {
    let mut details = match PropertyDetails::load(api, session, id, &config.uploads_base_url).await {
        Ok(details) => details,
        Err(e) => {
            warn!("Failed to load property {}: {}", id, e);
            println!("Property not found.");
            return Ok(());
        }
    };

    let property = details.property();
    println!("{}", details.listing().render(&config.uploads_base_url));
    if let Some(description) = &property.description {
        println!("\n{}", description);
    }
    if let Some(posted) = property.date_posted {
        println!("Posted {}", posted.format("%Y-%m-%d"));
    }

    let owner = property.owner_name.as_deref().unwrap_or("Unknown owner");
    match details.owner_link() {
        OwnerLink::MyDashboard => println!("\nListed by you (see `estate dashboard`)"),
        OwnerLink::PublicProfile(owner_id) => {
            println!("\nListed by {} (see `estate profile {}`)", owner, owner_id)
        }
        OwnerLink::Unknown => println!("\nListed by {}", owner),
    }
    if let Some(phone) = &property.owner_phone {
        println!("📞 {}", phone);
    }

    if let Some(photo) = photo {
        let gallery = details.gallery_mut();
        gallery.open(photo.saturating_sub(1));
        println!(
            "\nPhoto {}/{}: {}",
            gallery.index() + 1,
            gallery.len(),
            gallery.current()
        );
        return Ok(());
    }

    println!("\nPhotos:");
    for (i, image) in details.gallery().images().iter().enumerate() {
        println!("  {}. {}", i + 1, image);
    }
    Ok(())
}

async fn favorite(
    api: &dyn ListingApi,
    session: &SessionContext,
    config: &Config,
    id: i64,
) -> anyhow::Result<()> {
    let mut details = PropertyDetails::load(api, session, id, &config.uploads_base_url)
        .await
        .with_context(|| format!("Failed to load property {}", id))?;

    report_toggle(details.toggle_favorite(api, session).await, &details.property().title);
    Ok(())
}

async fn dashboard(
    api: &dyn ListingApi,
    session: &SessionContext,
    config: &Config,
    tab: Tab,
    toggle: Option<i64>,
) -> anyhow::Result<()> {
    let mut dashboard = match Dashboard::load(api, session).await {
        Ok(dashboard) => dashboard,
        Err(estate_client::ClientError::LoginRequired) => {
            println!("Please log in first (`estate login`).");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(id) = toggle {
        let outcome = dashboard.toggle_favorite(api, session, tab, id).await?;
        report_toggle(outcome, &format!("#{}", id));
    }

    if let Some(user) = dashboard.user() {
        println!("{} <{}>", user.full_name(), user.email);
    }
    println!(
        "My Listings ({}) | Favorites ({})\n",
        dashboard.owned().len(),
        dashboard.favorited().len()
    );

    let cards = dashboard.cards(tab);
    if cards.is_empty() {
        match tab {
            Tab::Listings => println!("You haven't listed any properties yet."),
            Tab::Favorites => println!("No favorites yet. Go explore!"),
        }
    }
    for card in cards {
        println!("{}\n", card.render(&config.uploads_base_url));
    }
    Ok(())
}

fn print_cards(properties: &[Property], config: &Config) {
    for property in properties {
        let card = ListingView::new(property.clone(), None);
        println!("{}\n", card.render(&config.uploads_base_url));
    }
}

fn report_toggle(outcome: ToggleOutcome, title: &str) {
    match outcome {
        ToggleOutcome::Applied { liked: true } => println!("♥ Added {} to favorites", title),
        ToggleOutcome::Applied { liked: false } => println!("♡ Removed {} from favorites", title),
        ToggleOutcome::Reverted { .. } => println!("Could not update favorites for {}", title),
        ToggleOutcome::LoginRequired => println!("Please log in first (`estate login`)."),
    }
}
