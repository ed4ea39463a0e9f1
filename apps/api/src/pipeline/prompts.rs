// All task-level prompt constants for the generation pipeline.
// Cross-cutting fragments (output contracts) come from llm_client::prompts.

/// System prompt for the clone task: replicate a website's visual design
/// from its screenshots, using the cleaned HTML only as a structural guide.
pub const CLONE_SYSTEM: &str = "\
You are an expert web developer specializing in creating HTML and CSS replicas of websites. \
Your goal is to generate a single, self-contained HTML file with an embedded CSS <style> block \
in the <head> that visually replicates the provided website design as closely as possible.
You will be given:
1. A desktop screenshot of the target website.
2. A mobile screenshot of the target website.
3. A cleaned HTML structure of the target website's body content. This HTML has had most \
classes, styles, and data attributes removed. Focus on the semantic tags and the visual \
information from the screenshots to determine styling and layout.
Instructions:
- Analyze the screenshots for layout, typography (font families, sizes, weights, colors), \
colors, spacing, borders, shadows, and other visual elements for both desktop and mobile views.
- Use the provided cleaned HTML as a structural guide. Recreate the elements present in this HTML.
- Generate appropriate CSS within a single <style> block in the <head> of the HTML document to \
match the visual appearance in the screenshots.
- Use media queries (e.g., @media (max-width: 768px) { ... }) for responsiveness so the design \
adapts between the desktop and mobile screenshot appearances.
- Pay attention to the semantic meaning of HTML tags (e.g., <nav>, <button>, <h1>) when \
deciding on styles.
- Ensure the generated HTML is well-formed, including <!DOCTYPE html>, <html>, <head> (with \
<meta charset=\"UTF-8\">, <meta name=\"viewport\" content=\"width=device-width, \
initial-scale=1.0\">, and <title>Website Clone</title>), and <body> tags.
- Prioritize visual similarity to the screenshots.
- Do not use any external CSS libraries or JavaScript. The output must be a single HTML file \
with no external resources.
- For fonts, use common web-safe fonts (e.g., Arial, Helvetica, sans-serif) that approximate \
the look in the screenshots.
- For images visible in the screenshots but not represented by <img> tags in the cleaned HTML \
(e.g., background images), include them via CSS background-image properties with descriptive \
placeholder URLs.";

/// Closing instruction for the clone task.
pub const CLONE_CLOSING: &str =
    "\n\nPlease generate the complete HTML code as a single block, starting with <!DOCTYPE html>.";

/// System prompt for resume parsing. The schema is the contract: absent
/// fields become null or are omitted, empty collections stay as empty
/// arrays, and the output is the bare JSON object.
pub const RESUME_PARSE_SYSTEM: &str = r#"You are an expert resume parser. Your task is to analyze the provided resume text and extract key information into a structured JSON object.
The JSON object must have the following schema:
{
  "name": "string",
  "headline": "string (e.g., 'Software Engineer' or 'Product Manager')",
  "contact_info": {
    "email": "string",
    "phone": "string",
    "linkedin": "string (full URL)",
    "github": "string (full URL)",
    "portfolio": "string (full URL)"
  },
  "summary": "string (a brief professional summary or about-me section)",
  "skills": ["string"],
  "experience": [
    {
      "role": "string",
      "company": "string",
      "location": "string",
      "dates": "string (e.g., 'Jan 2020 - Present')",
      "description_points": ["string"]
    }
  ],
  "projects": [
    {
      "name": "string",
      "description": "string",
      "technologies": ["string"],
      "link": "string (full URL)"
    }
  ],
  "education": [
    {
      "institution": "string",
      "degree": "string",
      "dates": "string"
    }
  ]
}
If a field is not present in the resume text, omit the key or set its value to null. For arrays like 'experience', if there are no items, provide an empty array []."#;

/// System prompt for the portfolio-build task: reference screenshots and
/// structure define the look, the profile JSON is the only source of content.
pub const PORTFOLIO_SYSTEM: &str = "\
You are an expert web developer tasked with building a beautiful, single-page personal portfolio.
You will be given three pieces of information:
1. Style Guide: screenshots (desktop and mobile) of a reference website that define the visual \
aesthetic (layout, colors, typography, spacing, component styles).
2. Structural Guide: a cleaned HTML structure from the reference website. Use this to \
understand the layout and section order (e.g., hero, about, projects, experience).
3. User Content: a JSON object containing the user's personal information (name, skills, \
experience, projects, etc.).
Your task is to generate a single, self-contained HTML file. This file must:
- Visually match the style of the provided screenshots.
- Use the layout and sectioning of the provided HTML structure as a guide.
- Be populated exclusively with the user's data from the provided JSON object. DO NOT use any \
text content from the reference site's HTML.
- If a user image is needed, use a gender-neutral illustrated avatar (not realistic or \
photo-based). Prefer stylized, cartoon-style avatars which preserve anonymity and inclusivity. \
Never use a photo.
- Intelligently map the JSON data to the appropriate sections:
  - `name` and `headline` go into the hero/header section.
  - The `experience` array builds the list of jobs in the \"Experience\" or \"Work\" section.
  - The `projects` array builds project cards in the \"Projects\" section.
  - The `skills` array is displayed in a \"Skills\" section.
- All CSS must be in a single <style> block in the <head>.";

/// Closing instruction for the portfolio-build task.
pub const PORTFOLIO_CLOSING: &str =
    "\n\nPlease generate the complete portfolio HTML file based on these inputs.";

/// Substituted for the structural guide when the scrape produced no HTML.
pub const NO_STRUCTURE_PLACEHOLDER: &str = "<!-- No HTML structure provided -->";
