/// A showcased project on the gallery page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub name: &'static str,
    pub summary: &'static str,
    pub url: &'static str,
}

pub static PROJECTS: [Project; 10] = [
    Project {
        name: "Gitskinz",
        summary: "GitHub README generator",
        url: "https://gitskinz.netlify.app/",
    },
    Project {
        name: "Shopwiz",
        summary: "Conversational shopping assistant",
        url: "https://shopwz.vercel.app/",
    },
    Project {
        name: "Techwiser",
        summary: "Tech blog UI",
        url: "https://techwiser.vercel.app/",
    },
    Project {
        name: "HungryzHub",
        summary: "Food delivery concept",
        url: "https://hungryzhub.vercel.app/",
    },
    Project {
        name: "Studenza",
        summary: "Student portal",
        url: "https://clgsphere.vercel.app/",
    },
    Project {
        name: "NutriSnap",
        summary: "AI nutrition tracking",
        url: "https://nutrisnapp-ai.vercel.app/",
    },
    Project {
        name: "SnippetSphere",
        summary: "Code snippets app",
        url: "https://snippetsphere.vercel.app/",
    },
    Project {
        name: "Techwiser CMS",
        summary: "Content management",
        url: "https://techwisercms.vercel.app/",
    },
    Project {
        name: "Musty MU",
        summary: "Music UI",
        url: "https://musty-mu.vercel.app/",
    },
    Project {
        name: "NbAIl",
        summary: "Voice-controlled AI assistant",
        url: "https://nbail-v4.vercel.app/",
    },
];

pub fn all() -> &'static [Project] {
    &PROJECTS
}
