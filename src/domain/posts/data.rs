use super::Post;

struct PostSource {
    slug: &'static str,
    title: &'static str,
    excerpt: &'static str,
    date: &'static str,
    read_time: &'static str,
    tags: &'static [&'static str],
    content: &'static str,
}

// Newest first: the feed's lastBuildDate is read from the head of this list.
static SOURCES: [PostSource; 4] = [
    PostSource {
        slug: "building-ai-that-doesnt-suck",
        title: "Building AI That Doesn't Suck",
        excerpt: "Most AI applications feel like tech demos. I explore what it takes to build AI-powered tools that people actually want to use daily.",
        date: "Dec 2024",
        read_time: "8 min",
        tags: &["AI", "Product Development", "UX Design"],
        content: include_str!("../../../content/posts/building-ai-that-doesnt-suck.md"),
    },
    PostSource {
        slug: "the-commerce-kids-guide-to-tech",
        title: "The Commerce Kid's Guide to Tech",
        excerpt: "My unconventional journey from balance sheets to code. Why starting late in tech is actually an advantage.",
        date: "Nov 2024",
        read_time: "6 min",
        tags: &["Career", "Learning", "Self-Taught"],
        content: include_str!("../../../content/posts/the-commerce-kids-guide-to-tech.md"),
    },
    PostSource {
        slug: "hackathons-speed-running-product-development",
        title: "Hackathons: Speed-Running Product Development",
        excerpt: "What I learned from winning multiple hackathons. A playbook for learning to build fast, validate quickly, and iterate ruthlessly.",
        date: "Oct 2024",
        read_time: "10 min",
        tags: &["Hackathons", "Product Development", "Learning"],
        content: include_str!(
            "../../../content/posts/hackathons-speed-running-product-development.md"
        ),
    },
    PostSource {
        slug: "why-i-built-gitskinz",
        title: "Why I Built Gitskinz",
        excerpt: "The story behind creating a GitHub profile generator used by developers worldwide. Why the best way to learn is to solve your own problems publicly.",
        date: "Sep 2024",
        read_time: "7 min",
        tags: &["Project", "Learning", "Open Source"],
        content: include_str!("../../../content/posts/why-i-built-gitskinz.md"),
    },
];

pub(super) fn builtin_posts() -> Vec<Post> {
    SOURCES
        .iter()
        .map(|source| Post {
            slug: source.slug.to_string(),
            title: source.title.to_string(),
            excerpt: source.excerpt.to_string(),
            date: source.date.to_string(),
            read_time: source.read_time.to_string(),
            tags: source.tags.iter().map(|tag| tag.to_string()).collect(),
            content: source.content.to_string(),
        })
        .collect()
}
